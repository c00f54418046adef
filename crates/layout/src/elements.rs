use serde::Serialize;
use tabula_style::{FontDescription, HAlign};
use tabula_table::Stroke;
use tabula_types::{Axis, Color, Rect};

/// A drawing primitive placed on a page, in layout units with the origin
/// at the top left.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionedElement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Only the part of the element inside this rectangle is visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<Rect>,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn new(rect: Rect, element: LayoutElement) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            clip: None,
            element,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutElement {
    Text(TextElement),
    Rule(RuleElement),
    Fill(FillElement),
}

/// One line of text; its box is the line box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextElement {
    pub content: String,
    pub font: FontDescription,
    pub color: Color,
    pub halign: HAlign,
    pub underline: bool,
}

/// A rule filling its box; `axis` is the direction the rule runs in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RuleElement {
    pub axis: Axis,
    pub stroke: Stroke,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillElement {
    pub color: Color,
}

/// Something layout can paint onto.
pub trait Surface {
    fn draw(&mut self, element: PositionedElement);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw(&mut self, element: PositionedElement) {
        (**self).draw(element)
    }
}

/// Collects everything drawn on it, in drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordingSurface {
    pub elements: Vec<PositionedElement>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match &e.element {
            LayoutElement::Text(t) => Some(t.content.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, element: PositionedElement) {
        self.elements.push(element);
    }
}

/// Draws onto another surface with the origin moved to `(dx, dy)`.
pub struct Offset<'s> {
    inner: &'s mut dyn Surface,
    dx: i32,
    dy: i32,
}

impl<'s> Offset<'s> {
    pub fn new(inner: &'s mut dyn Surface, dx: i32, dy: i32) -> Self {
        Self { inner, dx, dy }
    }
}

impl Surface for Offset<'_> {
    fn draw(&mut self, mut element: PositionedElement) {
        element.x += self.dx;
        element.y += self.dy;
        element.clip = element.clip.map(|c| c.translate(self.dx, self.dy));
        self.inner.draw(element);
    }
}

/// Drops elements outside `clip` and clips the ones crossing it.
pub struct Clipped<'s> {
    inner: &'s mut dyn Surface,
    clip: Rect,
}

impl<'s> Clipped<'s> {
    pub fn new(inner: &'s mut dyn Surface, clip: Rect) -> Self {
        Self { inner, clip }
    }
}

fn intersection(a: Rect, b: Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    Rect::new(x, y, (a.right().min(b.right()) - x).max(0), (a.bottom().min(b.bottom()) - y).max(0))
}

impl Surface for Clipped<'_> {
    fn draw(&mut self, mut element: PositionedElement) {
        let rect = element.rect();
        if !rect.intersects(&self.clip) {
            return;
        }
        let contained = rect.x >= self.clip.x
            && rect.y >= self.clip.y
            && rect.right() <= self.clip.right()
            && rect.bottom() <= self.clip.bottom();
        if !contained {
            element.clip = Some(match element.clip {
                Some(clip) => intersection(clip, self.clip),
                None => self.clip,
            });
        }
        self.inner.draw(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(x: i32, y: i32) -> PositionedElement {
        PositionedElement::new(
            Rect::new(x, y, 10, 10),
            LayoutElement::Fill(FillElement { color: Color::BLACK }),
        )
    }

    #[test]
    fn offset_and_clip_compose() {
        let mut page = RecordingSurface::new();
        {
            let mut offset = Offset::new(&mut page, 100, 200);
            let mut clipped = Clipped::new(&mut offset, Rect::new(0, 0, 15, 15));
            clipped.draw(fill(0, 0));
            clipped.draw(fill(10, 10));
            clipped.draw(fill(20, 0));
        }
        assert_eq!(page.elements.len(), 2);
        assert_eq!((page.elements[0].x, page.elements[0].y), (100, 200));
        assert_eq!(page.elements[0].clip, None);
        assert_eq!(page.elements[1].clip, Some(Rect::new(100, 200, 15, 15)));
    }
}
