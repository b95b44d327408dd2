//! Small element helpers layered over the `genpdf` primitives used by the ranking renderer.

use genpdf::elements::{PaddedElement, Paragraph};
use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Alignment, Element, Margins, Mm, RenderResult, Size};

/// Converts a millimetre value into the `genpdf` unit.
pub fn mm(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// A single aligned line of text in the given style.
pub fn text_line(text: impl Into<String>, alignment: Alignment, style: Style) -> Paragraph {
    let mut paragraph = Paragraph::new(genpdf::style::StyledString::new(text.into(), style));
    paragraph.set_alignment(alignment);
    paragraph
}

/// Table cell content: an aligned line with uniform padding so it clears the frame lines.
pub fn table_cell(
    text: impl Into<String>,
    alignment: Alignment,
    padding_mm: f64,
) -> PaddedElement<Paragraph> {
    text_line(text, alignment, Style::new()).padded(Margins::all(mm(padding_mm)))
}

/// Fixed vertical gap measured in millimetres.
///
/// `genpdf::elements::Break` counts lines of the current font, which makes the gap depend on the
/// font size; this element always takes the same height.  A gap that reaches the bottom of a page
/// is cut short rather than carried over.
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: mm(height_mm),
        }
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

