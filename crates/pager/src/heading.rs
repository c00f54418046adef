use std::collections::HashMap;
use tabula_layout::painting::box_painter::{TextStyle, paint_lines};
use tabula_layout::{LayoutEnvironment, Surface};
use tabula_style::{PageHeading, substitute_page_variables};
use tabula_types::Axis;

/// A page header or footer, measured once for the pager's body width.
#[derive(Debug, Clone, Default)]
pub struct HeadingBlock {
    heading: PageHeading,
    height: i32,
}

impl HeadingBlock {
    pub fn new(heading: &PageHeading, env: &LayoutEnvironment) -> Self {
        let width = env.style.size[Axis::H];
        let font = &env.style.font;
        let height = heading
            .paragraphs
            .iter()
            .map(|p| env.measurer.height(&p.markup, font, width))
            .sum();
        Self {
            heading: heading.clone(),
            height,
        }
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Paints the heading with its top at `top`, expanding page variables.
    pub fn paint(
        &self,
        surface: &mut dyn Surface,
        env: &LayoutEnvironment,
        page_number: u32,
        vars: &HashMap<String, String>,
        left: i32,
        top: i32,
    ) {
        let width = env.style.size[Axis::H];
        let font = &env.style.font;
        let line_height = env.measurer.line_height(font);
        let mut y = top;
        for paragraph in &self.heading.paragraphs {
            let text = substitute_page_variables(&paragraph.markup, page_number, vars);
            let lines = env.measurer.wrap(&text, font, width);
            let style = TextStyle {
                font,
                color: env.style.fg,
                halign: paragraph.halign,
                underline: false,
                line_height,
            };
            y += paint_lines(surface, &lines, &style, left, width, y);
        }
    }
}
