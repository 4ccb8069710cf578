use crate::config::DialogConfig;
use crate::error::DialogError;
use crate::runtime::host::{DialogHost, OpenState};
use crate::state::affordance::{FooterButtons, FooterInfo, FooterPolicy, GatedFooter};
use crate::state::dialog::{DialogProps, MultiStepDialog};
use crate::ui::layout::wrap_styled;
use crate::ui::span::SpanLine;
use crate::ui::surfaces::{DialogChrome, body};
use crate::ui::theme::Theme;

/// A static flow described by a YAML file. Steps carry their body text as
/// content; there is no guard.
pub struct ConfiguredHost {
    config: DialogConfig,
    open: OpenState,
}

impl ConfiguredHost {
    pub fn new(config: DialogConfig) -> Self {
        Self {
            config,
            open: OpenState::new(false),
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }
}

impl DialogHost for ConfiguredHost {
    type Content = Option<String>;

    fn chrome(&self) -> DialogChrome {
        let chrome = DialogChrome::new(self.config.title.clone());
        match &self.config.description {
            Some(description) => chrome.with_description(description.clone()),
            None => chrome,
        }
    }

    fn props(&mut self) -> DialogProps<Option<String>> {
        let mut props = DialogProps::new(self.config.to_registry())
            .open(self.open.get())
            .on_open_change(self.open.callback())
            .reset_on_reopen(self.config.reset_on_reopen);
        if let Some(initial) = &self.config.initial_step {
            props = props.initial_step(initial.clone());
        }
        props
    }

    fn render_content(&self, content: &Option<String>, theme: &Theme, width: usize) -> Vec<SpanLine> {
        match content {
            Some(text) => wrap_styled(text, width, theme.item),
            None => body::placeholder(theme),
        }
    }

    fn footer(&self, info: &FooterInfo) -> FooterButtons {
        GatedFooter::new(|_: &FooterInfo| false).buttons(info)
    }

    fn sync(&mut self, dialog: &mut MultiStepDialog<Option<String>>) -> Result<(), DialogError> {
        dialog.set_open(self.open.get())
    }
}
