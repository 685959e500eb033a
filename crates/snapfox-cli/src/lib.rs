use clap::ValueEnum;
use snapfox_browser::BrowserKind;

pub mod commands;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum BrowserChoice {
    Firefox,
    Chromium,
}

impl BrowserChoice {
    pub fn kind(&self) -> BrowserKind {
        match self {
            BrowserChoice::Firefox => BrowserKind::Firefox,
            BrowserChoice::Chromium => BrowserKind::Chromium,
        }
    }
}
