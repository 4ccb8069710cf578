use crate::error::{DialogError, Error};
use crate::runtime::command::Command;
use crate::runtime::host::DialogHost;
use crate::runtime::key_bindings::KeyBindings;
use crate::state::affordance::{DialogSnapshot, FooterButtons, FooterInfo, PrimaryAction, step_items};
use crate::state::dialog::{DialogHandle, MultiStepDialog};
use crate::state::view::ViewState;
use crate::terminal::{KeyCode, KeyEvent, Terminal, TerminalEvent, TerminalSize};
use crate::ui::renderer::{RenderFrame, Renderer, Scene};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(120);

pub struct Runtime<H: DialogHost> {
    host: H,
    dialog: MultiStepDialog<H::Content>,
    view: ViewState,
    key_bindings: KeyBindings,
    renderer: Renderer,
    should_exit: bool,
}

impl<H: DialogHost> Runtime<H> {
    pub fn new(mut host: H) -> Self {
        let dialog = MultiStepDialog::new(host.props());
        Self {
            host,
            dialog,
            view: ViewState::default(),
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
            should_exit: false,
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn dialog(&self) -> &MultiStepDialog<H::Content> {
        &self.dialog
    }

    pub fn handle(&self) -> DialogHandle<H::Content> {
        self.dialog.handle()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn run(&mut self, terminal: &mut Terminal) -> Result<(), Error> {
        terminal.enter()?;
        let run_result = self.event_loop(terminal);
        let exit_result = terminal.exit();
        run_result?;
        exit_result?;
        Ok(())
    }

    fn event_loop(&mut self, terminal: &mut Terminal) -> Result<(), Error> {
        self.draw(terminal)?;
        while !self.should_exit {
            match terminal.poll_event(POLL_INTERVAL)? {
                TerminalEvent::Key(key) => {
                    self.handle_key(key)?;
                    self.draw(terminal)?;
                }
                TerminalEvent::Resize(size) => {
                    terminal.set_size(size);
                    self.draw(terminal)?;
                }
                TerminalEvent::Tick => {}
            }
        }
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal) -> Result<(), Error> {
        let frame = self.frame(terminal.size())?;
        terminal.render_frame(&frame)?;
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<(), DialogError> {
        let command = self
            .key_bindings
            .resolve(key, self.dialog.is_open())
            .unwrap_or(Command::InputKey(key));
        self.apply(command)
    }

    /// Applies one command. Everything except `Exit` and `Open` is ignored
    /// while the dialog is closed.
    pub fn apply(&mut self, command: Command) -> Result<(), DialogError> {
        tracing::trace!(?command, "apply command");
        match command {
            Command::Exit => {
                self.should_exit = true;
                return Ok(());
            }
            Command::Open => {
                if !self.dialog.is_open() {
                    self.dialog.request_open_change(true);
                    self.host.sync(&mut self.dialog)?;
                }
                return Ok(());
            }
            Command::Noop => return Ok(()),
            _ if !self.dialog.is_open() => return Ok(()),
            _ => {}
        }

        match command {
            Command::Close => {
                self.dialog.request_open_change(false);
                self.host.sync(&mut self.dialog)?;
            }
            Command::Next => self.primary()?,
            Command::Back => self.back()?,
            Command::GoTo(id) => {
                self.dialog.handle().go_to(&id)?;
            }
            Command::FocusSwap => {
                let index = self.dialog.context()?.index;
                self.view.toggle_focus(index);
            }
            Command::SidebarUp if self.view.sidebar_focused() => self.view.cursor_up(),
            Command::SidebarUp => self.forward(KeyEvent::plain(KeyCode::Up))?,
            Command::SidebarDown if self.view.sidebar_focused() => {
                let total = self.dialog.context()?.total;
                self.view.cursor_down(total);
            }
            Command::SidebarDown => self.forward(KeyEvent::plain(KeyCode::Down))?,
            Command::Activate if self.view.sidebar_focused() => self.activate()?,
            Command::Activate => self.forward(KeyEvent::plain(KeyCode::Enter))?,
            Command::InputKey(key) => self.forward(key)?,
            Command::Exit | Command::Open | Command::Noop => {}
        }

        let total = self.dialog.context()?.total;
        self.view.clamp(total);
        Ok(())
    }

    pub fn footer_buttons(&self) -> Result<FooterButtons, DialogError> {
        let info = FooterInfo::from_context(&self.dialog.context()?);
        Ok(self.host.footer(&info))
    }

    /// The footer's primary button. A disabled button does nothing; an
    /// enabled Finish on the last step hands control to the host.
    fn primary(&mut self) -> Result<(), DialogError> {
        let info = FooterInfo::from_context(&self.dialog.context()?);
        let buttons = self.host.footer(&info);
        if buttons.primary_disabled {
            tracing::trace!("primary footer action is disabled");
            return Ok(());
        }
        if buttons.primary == PrimaryAction::Finish && info.is_last() {
            tracing::debug!(step = ?info.active_step_id, "dialog finished");
            self.host.on_finish(&mut self.dialog);
            return self.host.sync(&mut self.dialog);
        }
        self.dialog.handle().next()?;
        Ok(())
    }

    fn back(&mut self) -> Result<(), DialogError> {
        if self.footer_buttons()?.back_disabled {
            tracing::trace!("back footer action is disabled");
            return Ok(());
        }
        self.dialog.handle().prev()?;
        Ok(())
    }

    fn activate(&mut self) -> Result<(), DialogError> {
        let ctx = self.dialog.context()?;
        let Some(item) = step_items(&ctx).into_iter().nth(self.view.sidebar_cursor) else {
            return Ok(());
        };
        if item.disabled {
            tracing::trace!(step = %item.id, "sidebar item is disabled");
            return Ok(());
        }
        self.dialog.handle().go_to(&item.id)?;
        Ok(())
    }

    fn forward(&mut self, key: KeyEvent) -> Result<(), DialogError> {
        let ctx = self.dialog.context()?;
        let Some(step) = ctx.active_step() else {
            return Ok(());
        };
        if self.host.handle_key(&step.content, key) {
            self.host.sync(&mut self.dialog)?;
        }
        Ok(())
    }

    pub fn frame(&self, size: TerminalSize) -> Result<RenderFrame, DialogError> {
        let chrome = self.host.chrome();
        let handle = self.dialog.handle();
        let footer = |info: &FooterInfo| self.host.footer(info);
        let scene = Scene {
            chrome: &chrome,
            handle: &handle,
            open: self.dialog.is_open(),
            view: self.view,
            footer: &footer,
        };
        let theme = self.renderer.theme();
        self.renderer.render(&scene, size, |content, width| {
            self.host.render_content(content, theme, width)
        })
    }

    pub fn snapshot(&self) -> Result<DialogSnapshot, DialogError> {
        let ctx = self.dialog.context()?;
        let footer = |info: &FooterInfo| self.host.footer(info);
        Ok(DialogSnapshot::capture(&ctx, self.dialog.is_open(), &footer))
    }
}
