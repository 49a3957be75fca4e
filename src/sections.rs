use crate::scroll::SECTION_COUNT;
use crate::state::Viewport;

/// Static copy of one content section
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionContent {
    pub title: &'static str,
    pub body: &'static str,
    pub items: &'static [&'static str],
    pub call_to_action: Option<&'static str>,
}

pub const SECTIONS: [SectionContent; SECTION_COUNT] = [
    SectionContent {
        title: "Welcome to the Future",
        body: "Experience the next generation of web design where creativity meets technology. \
               Immerse yourself in a world of stunning 3D visuals and smooth interactions.",
        items: &[
            "Cutting-edge 3D animations",
            "Smooth scroll-based interactions",
            "Responsive mouse parallax effects",
            "High-performance rendering",
        ],
        call_to_action: None,
    },
    SectionContent {
        title: "Experience the Difference",
        body: "Our platform delivers unmatched visual excellence with performance that never \
               compromises. Every detail is crafted to provide a seamless, engaging experience.",
        items: &[
            "Real-time 3D morphing effects",
            "Physics-based smooth animations",
            "Advanced shader technology",
            "Mobile-optimized rendering",
        ],
        call_to_action: None,
    },
    SectionContent {
        title: "Get Started Today",
        body: "Ready to transform your digital presence? Join thousands of creators who are \
               already pushing the boundaries of what's possible on the web.",
        items: &[],
        call_to_action: Some("Start Your Journey"),
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Body,
    Item,
    Button,
    Indicator,
}

/// A run of text placed in viewport coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLine {
    pub row: u16,
    pub column: u16,
    pub text: String,
    pub style: TextStyle,
    pub active: bool,
}

const LEFT_MARGIN: u16 = 4;

impl SectionContent {
    /// Lines of the section wrapped to `width` columns
    pub fn lines(&self, width: usize) -> Vec<(TextStyle, String)> {
        let mut lines = vec![
            (TextStyle::Title, self.title.to_string()),
            (TextStyle::Body, String::new()),
        ];
        lines.extend(
            textwrap::wrap(self.body, width.max(1))
                .into_iter()
                .map(|line| (TextStyle::Body, line.into_owned())),
        );
        if !self.items.is_empty() {
            lines.push((TextStyle::Body, String::new()));
            lines.extend(
                self.items
                    .iter()
                    .map(|item| (TextStyle::Item, format!("• {item}"))),
            );
        }
        if let Some(label) = self.call_to_action {
            lines.push((TextStyle::Body, String::new()));
            lines.push((TextStyle::Button, format!("[ {label} ]")));
        }
        lines
    }
}

/// Width of the text column for a viewport
pub fn text_width(viewport: Viewport) -> usize {
    let available = usize::from(viewport.width.saturating_sub(2 * LEFT_MARGIN));
    (usize::from(viewport.width) / 2).clamp(24, 56).min(available)
}

/// Section copy that falls inside the viewport at `scroll_top`.
///
/// Each section fills one viewport-tall band of the document with its copy
/// centered vertically; only `active_section` is flagged active.
pub fn visible_lines(viewport: Viewport, scroll_top: f64, active_section: usize) -> Vec<OverlayLine> {
    if viewport.is_empty() {
        return Vec::new();
    }
    let width = text_width(viewport);
    let band = i64::from(viewport.height);
    let scroll_top = scroll_top.round() as i64;
    let mut visible = Vec::new();

    for (index, section) in SECTIONS.iter().enumerate() {
        let lines = section.lines(width);
        let block = lines.len() as i64;
        let start = index as i64 * band + ((band - block) / 2).max(0);
        for (offset, (style, text)) in lines.into_iter().enumerate() {
            let row = start + offset as i64 - scroll_top;
            if text.is_empty() || row < 0 || row >= band {
                continue;
            }
            visible.push(OverlayLine {
                row: row as u16,
                column: LEFT_MARGIN,
                text,
                style,
                active: index == active_section,
            });
        }
    }
    visible
}

/// One indicator dot per section along the right edge
pub fn navigation(viewport: Viewport, active_section: usize) -> Vec<OverlayLine> {
    if viewport.is_empty() {
        return Vec::new();
    }
    let column = viewport.width.saturating_sub(3);
    let first_row = (viewport.height / 2).saturating_sub(SECTION_COUNT as u16);
    (0..SECTION_COUNT)
        .map(|index| {
            let active = index == active_section;
            OverlayLine {
                row: (first_row + 2 * index as u16).min(viewport.height - 1),
                column,
                text: if active { "●" } else { "○" }.to_string(),
                style: TextStyle::Indicator,
                active,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 100,
        height: 30,
    };

    #[test]
    fn section_lines_wrap_to_width() {
        let lines = SECTIONS[0].lines(30);
        assert_eq!(lines[0], (TextStyle::Title, "Welcome to the Future".to_string()));
        assert!(lines.iter().all(|(_, text)| text.chars().count() <= 36));
        assert_eq!(
            lines.iter().filter(|(style, _)| *style == TextStyle::Item).count(),
            4
        );
    }

    #[test]
    fn last_section_ends_with_call_to_action() {
        let lines = SECTIONS[2].lines(40);
        assert_eq!(
            lines.last(),
            Some(&(TextStyle::Button, "[ Start Your Journey ]".to_string()))
        );
    }

    #[test]
    fn top_of_document_shows_only_first_section() {
        let lines = visible_lines(VIEWPORT, 0.0, 0);
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|line| line.active));
        assert!(lines.iter().any(|line| line.text == "Welcome to the Future"));
        assert!(lines.iter().all(|line| line.row < VIEWPORT.height));
    }

    #[test]
    fn scrolling_half_a_band_shows_two_sections() {
        let lines = visible_lines(VIEWPORT, 45.0, 1);
        assert!(lines
            .iter()
            .any(|line| line.active && line.style == TextStyle::Item));
        let title = lines
            .iter()
            .find(|line| line.text == "Get Started Today")
            .unwrap();
        assert!(!title.active);
        assert!(lines.iter().all(|line| line.text != "Welcome to the Future"));
    }

    #[test]
    fn section_top_shows_its_title() {
        let lines = visible_lines(VIEWPORT, 30.0, 1);
        let title = lines
            .iter()
            .find(|line| line.text == "Experience the Difference")
            .unwrap();
        assert!(title.active);
        assert_eq!(title.column, LEFT_MARGIN);
    }

    #[test]
    fn navigation_marks_the_active_section() {
        let dots = navigation(VIEWPORT, 2);
        assert_eq!(dots.len(), 3);
        assert_eq!(
            dots.iter().map(|dot| dot.text.as_str()).collect::<Vec<_>>(),
            ["○", "○", "●"]
        );
        assert!(dots.iter().all(|dot| dot.column == 97));
    }

    #[test]
    fn empty_viewport_has_no_overlay() {
        let viewport = Viewport::new(0, 0);
        assert!(visible_lines(viewport, 0.0, 0).is_empty());
        assert!(navigation(viewport, 0).is_empty());
    }
}
