//! Document construction for the ranking renderer.
//!
//! [`DocumentBuilder`] creates a `genpdf::Document` whose page decorator applies the page margins,
//! stops content at the page-break margin so overflowing rows continue on a new page, and draws
//! the optional footer once per page.

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style;
use genpdf::{self, Element, Margins, Mm, PageDecorator, Position, Size};

use crate::elements::mm;

type FooterFactory = dyn Fn(usize) -> Box<dyn Element>;

/// Builder for `genpdf::Document` instances laid out for a ranking table.
#[derive(Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    page_break_margin: Mm,
    footer: Option<FooterSpec>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size in millimetres.
    pub fn with_paper_size(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.paper_size = Some(Size::new(mm(width_mm), mm(height_mm)));
        self
    }

    /// Sets the left, top and right page margins.
    ///
    /// The bottom edge is governed by [`DocumentBuilder::with_page_break_margin`].
    pub fn with_margins(mut self, left_mm: f64, top_mm: f64, right_mm: f64) -> Self {
        self.margins = Some(Margins::trbl(mm(top_mm), mm(right_mm), 0, mm(left_mm)));
        self
    }

    /// Distance from the bottom edge at which content breaks onto the next page.
    pub fn with_page_break_margin(mut self, margin_mm: f64) -> Self {
        self.page_break_margin = mm(margin_mm);
        self
    }

    /// Configures a footer drawn on every page, `offset_mm` above the bottom edge.
    pub fn with_footer<F, E>(mut self, offset_mm: f64, footer: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.footer = Some(FooterSpec::new(mm(offset_mm), footer));
        self
    }

    /// Indicates whether a footer will be drawn on each page.
    pub fn has_footer(&self) -> bool {
        self.footer.is_some()
    }

    /// Builds a configured `genpdf::Document` using `font_family` as its default family.
    pub fn build(self, font_family: FontFamily<FontData>) -> genpdf::Document {
        let mut document = genpdf::Document::new(font_family);

        if let Some(title) = self.title {
            document.set_title(title);
        }

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        document.set_page_decorator(RankingPageDecorator::new(
            self.margins,
            self.page_break_margin,
            self.footer,
        ));

        document
    }
}

/// Definition of a footer rendered through the page decorator.
pub struct FooterSpec {
    offset: Mm,
    factory: Box<FooterFactory>,
}

impl FooterSpec {
    /// Creates a footer drawn by `factory` for each page.
    pub fn new<F, E>(offset: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            offset: offset.into(),
            factory: Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

struct RankingPageDecorator {
    page: usize,
    margins: Option<Margins>,
    page_break_margin: Mm,
    footer: Option<FooterSpec>,
}

impl RankingPageDecorator {
    fn new(margins: Option<Margins>, page_break_margin: Mm, footer: Option<FooterSpec>) -> Self {
        Self {
            page: 0,
            margins,
            page_break_margin,
            footer,
        }
    }
}

impl PageDecorator for RankingPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        let available = area.size().height;
        if self.page_break_margin >= available {
            return Err(Error::new(
                "Page-break margin leaves no room for content",
                ErrorKind::InvalidData,
            ));
        }

        if let Some(footer) = &self.footer {
            if footer.offset > self.page_break_margin {
                return Err(Error::new(
                    "Footer would overlap the page content",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - footer.offset));
            let mut element = (footer.factory)(self.page);
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }
        }

        area.set_height(available - self.page_break_margin);
        Ok(area)
    }
}
