//! Interactive terminal menu.
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;

use crate::assistant::Assistant;
use crate::clipboard::ClipboardProvider;

/// Run the menu until the user quits
pub fn run_interactive(assistant: Assistant, clipboard: Box<dyn ClipboardProvider>) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(assistant, clipboard);

    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    if res.is_ok() {
        println!("Obrigado por usar o quickreply! Até logo!");
    }
    res
}
