//! Typed surface tree for overlay panels.
//!
//! Each controller assembles a [`Panel`] out of element descriptors instead
//! of concatenating markup, and the renderer lays the tree out into the
//! buffer. Rendering returns a [`Surface`] with the panel rect and the hit
//! areas (one rect per interactive row/button, tagged with its key) the
//! controller uses to dispatch mouse clicks.

use crate::overlay::anim::Effect;
use crate::styles::{theme, ROW_HIGHLIGHT_SYMBOL};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

/// Which screen edge the panel sticks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
}

/// How the panel width is determined
#[derive(Debug, Clone, Copy)]
pub enum PanelWidth {
    /// Fixed number of columns
    Fixed(u16),
    /// Percentage of the available area
    Percent(u16),
    /// Fit the content, clamped to `min..=max` columns
    Auto { min: u16, max: u16 },
}

/// One interactive row (sheet item or modal footer button)
#[derive(Debug, Clone)]
pub struct Row {
    /// Key reported to the callback when this row is activated
    pub key: String,
    /// Display text
    pub text: String,
    /// Optional per-row color
    pub color: Option<Color>,
}

/// Content element inside a panel, stacked top to bottom
#[derive(Debug, Clone)]
pub enum Element {
    /// Icon + title line(s) (toast body)
    Banner {
        icon: Option<String>,
        icon_color: Option<Color>,
        title: Option<String>,
        /// Icon and title share one line instead of stacking
        inline: bool,
        /// Wrap the title instead of truncating it to one line
        multi_line: bool,
    },
    /// Bold centered heading
    Title(String),
    /// Wrapped body text
    Body(String),
    /// Horizontal separator line
    Divider,
    /// Vertical list of selectable rows
    Items {
        rows: Vec<Row>,
        selected: Option<usize>,
    },
    /// Footer button row; `inline` puts all buttons on one line
    Buttons {
        rows: Vec<Row>,
        selected: Option<usize>,
        inline: bool,
    },
}

/// A complete overlay panel description
#[derive(Debug, Clone)]
pub struct Panel {
    pub anchor: Anchor,
    pub width: PanelWidth,
    pub border: bool,
    /// Border color override (defaults to the theme border color)
    pub accent: Option<Color>,
    /// Dark panel background regardless of theme
    pub dark: bool,
    /// Inset from the anchored edge (ignored for `Anchor::Center`)
    pub offset: u16,
    /// Extra one-cell inset at the anchored edge
    pub safe_area: bool,
    pub children: Vec<Element>,
}

impl Panel {
    pub fn new(anchor: Anchor, width: PanelWidth) -> Self {
        Self {
            anchor,
            width,
            border: true,
            accent: None,
            dark: false,
            offset: 0,
            safe_area: false,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(element);
        self
    }
}

/// Result of rendering a panel: geometry the controller needs for input
#[derive(Debug, Clone, Default)]
pub struct Surface {
    /// Outer panel rect as drawn this frame
    pub panel: Rect,
    /// Clickable rects with the key they activate
    pub hits: Vec<(Rect, String)>,
}

impl Surface {
    /// Key of the hit area under the given position, if any
    pub fn hit(&self, column: u16, row: u16) -> Option<&str> {
        self.hits
            .iter()
            .find(|(rect, _)| rect.contains(ratatui::layout::Position::new(column, row)))
            .map(|(_, key)| key.as_str())
    }

    /// Whether the position falls inside the panel
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.panel
            .contains(ratatui::layout::Position::new(column, row))
    }
}

/// Number of lines `text` occupies when wrapped to `width` columns
fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let width = width as usize;
    let mut lines = 0u16;
    for raw in text.split('\n') {
        let mut used = 0usize;
        let mut line_count = 1u16;
        for word in raw.split_whitespace() {
            let w = word.chars().count();
            if used == 0 {
                used = w.min(width);
            } else if used + 1 + w <= width {
                used += 1 + w;
            } else {
                line_count += 1;
                used = w.min(width);
            }
        }
        lines += line_count;
    }
    lines.max(1)
}

fn element_min_width(element: &Element) -> u16 {
    let text_width = |s: &str| s.chars().count() as u16;
    match element {
        Element::Banner {
            icon,
            title,
            inline,
            ..
        } => {
            let icon_w = icon.as_deref().map_or(0, text_width);
            let title_w = title.as_deref().map_or(0, text_width);
            if *inline && icon_w > 0 {
                icon_w + 1 + title_w
            } else {
                icon_w.max(title_w)
            }
        }
        Element::Title(text) | Element::Body(text) => text_width(text),
        Element::Divider => 0,
        Element::Items { rows, .. } => rows
            .iter()
            .map(|r| text_width(&r.text) + ROW_HIGHLIGHT_SYMBOL.chars().count() as u16)
            .max()
            .unwrap_or(0),
        Element::Buttons { rows, inline, .. } => {
            if *inline {
                // Each button needs its text plus breathing room
                rows.iter().map(|r| text_width(&r.text) + 4).sum()
            } else {
                rows.iter().map(|r| text_width(&r.text) + 4).max().unwrap_or(0)
            }
        }
    }
}

fn element_height(element: &Element, inner_width: u16) -> u16 {
    match element {
        Element::Banner {
            icon,
            title,
            inline,
            multi_line,
            ..
        } => {
            if *inline {
                1
            } else {
                let icon_h = u16::from(icon.is_some());
                let title_h = match title {
                    Some(t) if *multi_line => wrapped_height(t, inner_width),
                    Some(_) => 1,
                    None => 0,
                };
                (icon_h + title_h).max(1)
            }
        }
        Element::Title(_) | Element::Divider => 1,
        Element::Body(text) => wrapped_height(text, inner_width),
        Element::Items { rows, .. } => rows.len() as u16,
        Element::Buttons { rows, inline, .. } => {
            if *inline {
                1
            } else {
                rows.len() as u16
            }
        }
    }
}

/// Render a panel (and optionally a dimming backdrop) into the buffer.
///
/// `effect` shifts, shrinks, or dims the panel for the current transition
/// frame; pass [`Effect::NONE`] for a settled panel.
pub fn render(
    backdrop: bool,
    panel: &Panel,
    effect: Effect,
    area: Rect,
    buf: &mut Buffer,
) -> Surface {
    let t = theme();

    if backdrop {
        let dim = Block::default().style(t.dim_style());
        Widget::render(dim, area, buf);
    }

    if area.width < 4 || area.height < 3 {
        return Surface::default();
    }

    // Resolve width
    let max_avail = area.width.saturating_sub(4);
    let panel_width = match panel.width {
        PanelWidth::Fixed(w) => w.min(area.width),
        PanelWidth::Percent(p) => (area.width as f32 * (p as f32 / 100.0)) as u16,
        PanelWidth::Auto { min, max } => {
            let content = panel
                .children
                .iter()
                .map(element_min_width)
                .max()
                .unwrap_or(0);
            // content + horizontal padding (2) + borders (2)
            (content + 4).clamp(min, max.min(max_avail).max(min))
        }
    }
    .min(area.width);

    let border_lines = if panel.border { 2 } else { 0 };
    let inner_width = panel_width.saturating_sub(border_lines + 2);
    let content_height: u16 = panel
        .children
        .iter()
        .map(|e| element_height(e, inner_width))
        .sum();
    let panel_height = (content_height + border_lines).min(area.height);

    // Anchor the panel
    let inset = panel.offset + u16::from(panel.safe_area);
    let x = area.x + (area.width.saturating_sub(panel_width)) / 2;
    let y = match panel.anchor {
        Anchor::Top => area.y + inset.min(area.height.saturating_sub(panel_height)),
        Anchor::Center => area.y + (area.height.saturating_sub(panel_height)) / 2,
        Anchor::Bottom => area
            .y
            .saturating_add(area.height)
            .saturating_sub(panel_height + inset),
    };
    let mut rect = Rect::new(x, y, panel_width, panel_height);

    // Apply the transition effect
    if effect.shrink > 0.0 {
        let keep = (1.0 - effect.shrink).clamp(0.0, 1.0);
        let w = ((rect.width as f32) * keep).round().max(1.0) as u16;
        let h = ((rect.height as f32) * keep).round().max(1.0) as u16;
        rect = Rect::new(
            rect.x + (rect.width - w) / 2,
            rect.y + (rect.height - h) / 2,
            w,
            h,
        );
    }
    if effect.slide != 0.0 {
        let dy = (effect.slide * rect.height as f32).round() as i32;
        let new_y = i32::from(rect.y) + dy;
        rect = Rect::new(rect.x, new_y.max(0) as u16, rect.width, rect.height);
    }
    let rect = rect.intersection(area);
    if rect.width == 0 || rect.height == 0 {
        return Surface::default();
    }

    // Panel chrome
    Widget::render(Clear, rect, buf);
    let border_color = panel.accent.unwrap_or(t.border_focused);
    let inner = if panel.border {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(t.panel_border_type())
            .border_style(Style::default().fg(border_color))
            .style(t.panel_style(panel.dark));
        let inner = block.inner(rect);
        Widget::render(block, rect, buf);
        inner
    } else {
        let fill = Block::default().style(t.panel_style(panel.dark));
        Widget::render(fill, rect, buf);
        rect
    };
    // One column of horizontal padding inside the border
    let inner = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height,
    );

    let mut surface = Surface {
        panel: rect,
        hits: Vec::new(),
    };

    // Lay the children out top to bottom, clipping at the panel bottom
    let mut cursor = inner.y;
    let bottom = inner.y + inner.height;
    for element in &panel.children {
        if cursor >= bottom {
            break;
        }
        let height = element_height(element, inner.width).min(bottom - cursor);
        let slot = Rect::new(inner.x, cursor, inner.width, height);
        render_element(element, slot, buf, &mut surface);
        cursor += height;
    }

    if effect.dim {
        buf.set_style(rect, Style::default().add_modifier(Modifier::DIM));
    }

    surface
}

fn render_element(element: &Element, slot: Rect, buf: &mut Buffer, surface: &mut Surface) {
    let t = theme();
    match element {
        Element::Banner {
            icon,
            icon_color,
            title,
            inline,
            multi_line,
        } => {
            let icon_style = Style::default().fg(icon_color.unwrap_or(t.primary));
            if *inline {
                let mut spans = Vec::new();
                if let Some(glyph) = icon {
                    spans.push(Span::styled(glyph.clone(), icon_style));
                    spans.push(Span::raw(" "));
                }
                if let Some(text) = title {
                    spans.push(Span::styled(text.clone(), t.text_style()));
                }
                let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
                Widget::render(para, slot, buf);
            } else {
                let mut lines = Vec::new();
                if let Some(glyph) = icon {
                    lines.push(Line::from(Span::styled(glyph.clone(), icon_style)));
                }
                if let Some(text) = title {
                    lines.push(Line::from(Span::styled(text.clone(), t.text_style())));
                }
                let mut para = Paragraph::new(lines).alignment(Alignment::Center);
                if *multi_line {
                    para = para.wrap(Wrap { trim: true });
                }
                Widget::render(para, slot, buf);
            }
        }
        Element::Title(text) => {
            let para = Paragraph::new(text.as_str())
                .alignment(Alignment::Center)
                .style(t.title_style());
            Widget::render(para, slot, buf);
        }
        Element::Body(text) => {
            let para = Paragraph::new(text.as_str())
                .alignment(Alignment::Left)
                .style(t.text_style())
                .wrap(Wrap { trim: true });
            Widget::render(para, slot, buf);
        }
        Element::Divider => {
            let line = "─".repeat(slot.width as usize);
            let para = Paragraph::new(line).style(t.border_style());
            Widget::render(para, slot, buf);
        }
        Element::Items { rows, selected } => {
            for (i, row) in rows.iter().enumerate() {
                if i as u16 >= slot.height {
                    break;
                }
                let row_rect = Rect::new(slot.x, slot.y + i as u16, slot.width, 1);
                let focused = *selected == Some(i);
                let style = if focused {
                    row_style(row, t.highlight_style())
                } else {
                    row_style(row, t.text_style())
                };
                let prefix = if focused { ROW_HIGHLIGHT_SYMBOL } else { "" };
                let para = Paragraph::new(format!("{}{}", prefix, row.text))
                    .alignment(Alignment::Center)
                    .style(style);
                Widget::render(para, row_rect, buf);
                surface.hits.push((row_rect, row.key.clone()));
            }
        }
        Element::Buttons {
            rows,
            selected,
            inline,
        } => {
            if rows.is_empty() {
                return;
            }
            if *inline {
                let constraints = vec![Constraint::Ratio(1, rows.len() as u32); rows.len()];
                let cells = Layout::horizontal(constraints).split(slot);
                for (i, (row, cell)) in rows.iter().zip(cells.iter()).enumerate() {
                    render_button(row, *selected == Some(i), *cell, buf);
                    surface.hits.push((*cell, row.key.clone()));
                }
            } else {
                for (i, row) in rows.iter().enumerate() {
                    if i as u16 >= slot.height {
                        break;
                    }
                    let cell = Rect::new(slot.x, slot.y + i as u16, slot.width, 1);
                    render_button(row, *selected == Some(i), cell, buf);
                    surface.hits.push((cell, row.key.clone()));
                }
            }
        }
    }
}

fn render_button(row: &Row, focused: bool, cell: Rect, buf: &mut Buffer) {
    let t = theme();
    let style = if focused {
        row_style(row, t.highlight_style())
    } else {
        row_style(row, t.text_style())
    };
    let text = if focused {
        format!("[ {} ]", row.text)
    } else {
        format!("  {}  ", row.text)
    };
    let para = Paragraph::new(text).alignment(Alignment::Center).style(style);
    Widget::render(para, cell, buf);
}

fn row_style(row: &Row, base: Style) -> Style {
    match row.color {
        Some(color) => base.fg(color),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_height_single_line() {
        assert_eq!(wrapped_height("hello", 20), 1);
    }

    #[test]
    fn test_wrapped_height_wraps_on_words() {
        // "hello world again" at width 6: hello / world / again
        assert_eq!(wrapped_height("hello world again", 6), 3);
    }

    #[test]
    fn test_wrapped_height_explicit_newlines() {
        assert_eq!(wrapped_height("a\nb\nc", 20), 3);
    }

    #[test]
    fn test_auto_width_clamps_to_min() {
        let panel = Panel::new(
            Anchor::Center,
            PanelWidth::Auto { min: 20, max: 60 },
        )
        .child(Element::Title("hi".into()));
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        let surface = render(false, &panel, Effect::NONE, Rect::new(0, 0, 80, 24), &mut buf);
        assert_eq!(surface.panel.width, 20);
    }

    #[test]
    fn test_items_record_hit_areas() {
        let panel = Panel::new(Anchor::Bottom, PanelWidth::Percent(50)).child(Element::Items {
            rows: vec![
                Row {
                    key: "0".into(),
                    text: "First".into(),
                    color: None,
                },
                Row {
                    key: "1".into(),
                    text: "Second".into(),
                    color: None,
                },
            ],
            selected: Some(0),
        });
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        let surface = render(true, &panel, Effect::NONE, area, &mut buf);
        assert_eq!(surface.hits.len(), 2);
        let (first_rect, first_key) = &surface.hits[0];
        assert_eq!(first_key, "0");
        assert_eq!(surface.hit(first_rect.x, first_rect.y), Some("0"));
        assert!(surface.contains(first_rect.x, first_rect.y));
    }

    #[test]
    fn test_tiny_area_renders_nothing() {
        let panel = Panel::new(Anchor::Center, PanelWidth::Fixed(10))
            .child(Element::Title("x".into()));
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        let surface = render(false, &panel, Effect::NONE, area, &mut buf);
        assert_eq!(surface.panel, Rect::default());
        assert!(surface.hits.is_empty());
    }
}
