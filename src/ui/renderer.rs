use crate::error::DialogError;
use crate::state::affordance::FooterPolicy;
use crate::state::dialog::DialogHandle;
use crate::state::view::ViewState;
use crate::terminal::TerminalSize;
use crate::ui::layout::{clip_line, join_columns};
use crate::ui::span::{Span, SpanLine};
use crate::ui::surfaces::{self, DialogChrome};
use crate::ui::theme::Theme;

pub const LAUNCHER_HINT: &str = "Press o to open, q to quit";
pub const KEY_HINT: &str = "Tab switch focus  Ctrl+Left/Right back/next  Esc close";

const COLUMN_SEPARATOR: &str = " │ ";
const MIN_BODY_WIDTH: usize = 10;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
}

impl RenderFrame {
    /// No line of the returned frame is wider than `width`.
    fn clipped(self, width: usize) -> Self {
        Self {
            lines: self.lines.iter().map(|line| clip_line(line, width)).collect(),
        }
    }
}

/// Everything one frame is drawn from.
pub struct Scene<'a, C> {
    pub chrome: &'a DialogChrome,
    pub handle: &'a DialogHandle<C>,
    pub open: bool,
    pub view: ViewState,
    pub footer: &'a dyn FooterPolicy,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    sidebar_width: usize,
    theme: Theme,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SIDEBAR_WIDTH)
    }
}

impl Renderer {
    pub fn new(sidebar_width: u16) -> Self {
        Self {
            sidebar_width: sidebar_width as usize,
            theme: Theme::default_theme(),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Lays out header, progress, the sidebar and body columns, then the
    /// footer. `content` renders the active step's content at the given
    /// body width.
    pub fn render<C>(
        &self,
        scene: &Scene<'_, C>,
        size: TerminalSize,
        content: impl FnOnce(&C, usize) -> Vec<SpanLine>,
    ) -> Result<RenderFrame, DialogError> {
        let width = size.width as usize;
        let theme = &self.theme;
        let mut frame = RenderFrame::default();

        if !scene.open {
            frame
                .lines
                .push(vec![Span::styled(scene.chrome.title.clone(), theme.title)]);
            frame
                .lines
                .push(vec![Span::styled(LAUNCHER_HINT, theme.muted)]);
            return Ok(frame.clipped(width));
        }

        let (sidebar_width, body_width) = self.column_widths(width);

        frame
            .lines
            .extend(surfaces::header::render(scene.chrome, theme, width));
        frame
            .lines
            .push(surfaces::progress::render(scene.handle, theme, width)?);
        frame.lines.push(SpanLine::new());

        let cursor = scene
            .view
            .sidebar_focused()
            .then_some(scene.view.sidebar_cursor);
        let sidebar = surfaces::sidebar::render(scene.handle, theme, sidebar_width, cursor)?;
        let body = surfaces::body::render(scene.handle, theme, |c| content(c, body_width))?;
        frame.lines.extend(join_columns(
            &sidebar,
            sidebar_width,
            &Span::styled(COLUMN_SEPARATOR, theme.border),
            &body,
            body_width,
        ));

        frame
            .lines
            .push(vec![Span::styled("─".repeat(width), theme.border)]);
        let (footer, _) = surfaces::footer::render(scene.handle, theme, width, scene.footer)?;
        frame.lines.push(footer);
        frame.lines.push(vec![Span::styled(KEY_HINT, theme.muted)]);
        Ok(frame.clipped(width))
    }

    fn column_widths(&self, width: usize) -> (usize, usize) {
        let separator = COLUMN_SEPARATOR.chars().count();
        let sidebar = self
            .sidebar_width
            .min(width.saturating_sub(separator + MIN_BODY_WIDTH));
        (sidebar, width.saturating_sub(sidebar + separator))
    }
}

#[cfg(test)]
mod tests {
    use super::{LAUNCHER_HINT, Renderer, Scene};
    use crate::core::registry::StepRegistry;
    use crate::core::step::Step;
    use crate::state::affordance::StandardFooter;
    use crate::state::dialog::{DialogProps, MultiStepDialog};
    use crate::state::view::ViewState;
    use crate::terminal::TerminalSize;
    use crate::ui::span::{Span, line_width, plain_text};
    use crate::ui::surfaces::DialogChrome;

    fn dialog() -> MultiStepDialog<&'static str> {
        MultiStepDialog::new(DialogProps::new(StepRegistry::new(vec![
            Step::new("general", "General", "general body"),
            Step::new("database", "Database", "database body"),
        ])))
    }

    #[test]
    fn closed_dialog_renders_the_launcher() {
        let dialog = dialog();
        let chrome = DialogChrome::new("Project Setup");
        let handle = dialog.handle();
        let scene = Scene {
            chrome: &chrome,
            handle: &handle,
            open: false,
            view: ViewState::default(),
            footer: &StandardFooter,
        };
        let frame = Renderer::default()
            .render(&scene, TerminalSize::default(), |_, _| Vec::new())
            .expect("attached");
        assert_eq!(frame.lines.len(), 2);
        assert_eq!(plain_text(&frame.lines[1]), LAUNCHER_HINT);
    }

    #[test]
    fn open_dialog_places_body_beside_sidebar() {
        let dialog = dialog();
        let chrome = DialogChrome::new("Project Setup").with_description("Configure your project settings");
        let handle = dialog.handle();
        let scene = Scene {
            chrome: &chrome,
            handle: &handle,
            open: true,
            view: ViewState::default(),
            footer: &StandardFooter,
        };
        let size = TerminalSize {
            width: 60,
            height: 20,
        };
        let frame = Renderer::new(20)
            .render(&scene, size, |body: &&str, _| vec![vec![Span::new(*body)]])
            .expect("attached");

        let text: Vec<String> = frame.lines.iter().map(plain_text).collect();
        assert_eq!(text[0], "Project Setup");
        let first_row = text
            .iter()
            .find(|line| line.contains("General"))
            .expect("sidebar row");
        assert!(first_row.contains("│ general body"));
        assert!(text.iter().any(|line| line.starts_with("Step 1 of 2")));
        assert!(frame.lines.iter().all(|line| line_width(line) <= 60));
    }

    #[test]
    fn narrow_terminals_clip_every_line() {
        let dialog = dialog();
        let chrome = DialogChrome::new("Project Setup").with_action("Esc to close");
        let handle = dialog.handle();
        for open in [false, true] {
            let scene = Scene {
                chrome: &chrome,
                handle: &handle,
                open,
                view: ViewState::default(),
                footer: &StandardFooter,
            };
            for width in [0u16, 12, 20, 40] {
                let size = TerminalSize { width, height: 20 };
                let frame = Renderer::default()
                    .render(&scene, size, |body: &&str, _| vec![vec![Span::new(*body)]])
                    .expect("attached");
                assert!(
                    frame.lines.iter().all(|line| line_width(line) <= width as usize),
                    "open={open} width={width}"
                );
            }
        }
    }
}
