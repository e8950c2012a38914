//! Interactive menu state and event handling.
//!
//! The menu mirrors the classic support-desk workflow: the left pane lists the
//! quick responses grouped by category, the right pane previews the selection
//! or the last copied text, and a single input line takes either a response
//! code or one of the commands:
//!
//! - `buscar <termo>`: search codes and message text
//! - `add`: add a response through a three-step prompt
//! - `template`: pick a template, then fill each placeholder in turn
//! - `hist`: show the responses used in this session
//! - `sair`: quit
//!
//! Commands are case-insensitive; codes are matched exactly. Pressing Enter on
//! an empty line uses the highlighted response.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{ListRow, Preview, RenderState, render_ui};
use crate::assistant::Assistant;
use crate::clipboard::{ClipboardProvider, copy_with_provider};
use crate::store::StoreError;
use crate::templates::{Bindings, field_label};
use crate::utils::{display_snippet, strip_ansi_codes};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest accepted input line, in characters
const MAX_INPUT_CHARS: usize = 2000;
/// Responses shown by `hist`
const HISTORY_SHOWN: usize = 5;
const LIST_PREVIEW_CHARS: usize = 65;
const HISTORY_PREVIEW_CHARS: usize = 70;
const SEARCH_PREFIX: &str = "buscar";

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// What the left pane shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Menu,
    Search { term: String, codes: Vec<String> },
    Templates,
    History,
}

/// A multi-step dialog waiting for the next input line
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    AddCode,
    AddCategory { code: String },
    AddMessage { code: String, category: String },
    TemplateChoice,
    TemplateField { template: String, pending: Vec<String>, bindings: Bindings },
}

impl Prompt {
    fn label(&self) -> String {
        match self {
            Prompt::AddCode => "Código único (ex: 'problema_email')".to_string(),
            Prompt::AddCategory { .. } => "Categoria (ex: 'email', 'rede', 'acesso')".to_string(),
            Prompt::AddMessage { .. } => "Mensagem completa".to_string(),
            Prompt::TemplateChoice => "Escolha o template (número ou nome)".to_string(),
            Prompt::TemplateField { pending, .. } => {
                pending.first().map(|f| field_label(f)).unwrap_or("Campo").to_string()
            }
        }
    }
}

/// Text most recently handed to the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
struct Output {
    title: String,
    text: String,
}

pub struct App {
    assistant: Assistant,
    clipboard: Box<dyn ClipboardProvider>,
    view: View,
    prompt: Option<Prompt>,
    input: String,
    selected_idx: usize,
    last_output: Option<Output>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(assistant: Assistant, clipboard: Box<dyn ClipboardProvider>) -> Self {
        let clipboard_available = clipboard.is_available();
        let mut app = Self {
            assistant,
            clipboard,
            view: View::Menu,
            prompt: None,
            input: String::new(),
            selected_idx: 0,
            last_output: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        };
        if !clipboard_available {
            app.set_status("Área de transferência indisponível; copie o texto da prévia", MessageType::Error);
        }
        app
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType) {
        let duration_ms = match message_type {
            MessageType::Success => STATUS_SUCCESS_DURATION_MS,
            MessageType::Error => STATUS_ERROR_DURATION_MS,
        };
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success);
    }

    fn error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error);
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                let state = self.render_state();
                terminal.draw(|f| render_ui(f, &state))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => self.cancel(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-10),
            Action::PageDown => self.move_selection(10),
            Action::Submit => self.submit(),
            Action::ClearInput => {
                self.input.clear();
                self.needs_redraw = true;
            }
            Action::Insert(c) => {
                if self.input.chars().count() < MAX_INPUT_CHARS {
                    self.input.push(c);
                    self.needs_redraw = true;
                }
            }
            Action::DeleteChar => {
                if self.input.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Action::None => {}
        }
    }

    /// Esc backs out one level: prompt, then input, then view, then the app
    fn cancel(&mut self) {
        self.needs_redraw = true;
        if self.prompt.take().is_some() {
            self.input.clear();
            self.show_view(View::Menu);
            self.error("Operação cancelada.");
        } else if !self.input.is_empty() {
            self.input.clear();
        } else if self.view != View::Menu {
            self.show_view(View::Menu);
        } else {
            self.should_quit = true;
        }
    }

    /// Codes the selection moves over, in display order
    fn selectable_codes(&self) -> Vec<String> {
        match &self.view {
            View::Menu => self
                .assistant
                .grouped_by_category()
                .into_iter()
                .flat_map(|(_, members)| members.into_iter().map(|(code, _)| code.to_string()))
                .collect(),
            View::Search { codes, .. } => codes.clone(),
            View::Templates | View::History => Vec::new(),
        }
    }

    fn selected_code(&self) -> Option<String> {
        self.selectable_codes().into_iter().nth(self.selected_idx)
    }

    fn move_selection(&mut self, delta: isize) {
        if self.prompt.is_some() {
            return;
        }
        let total = self.selectable_codes().len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.last_output = None;
            self.needs_redraw = true;
        }
    }

    fn show_view(&mut self, view: View) {
        self.view = view;
        self.selected_idx = 0;
        self.needs_redraw = true;
    }

    fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
        self.input.clear();
        self.needs_redraw = true;
    }

    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.needs_redraw = true;
        match self.prompt.take() {
            Some(prompt) => self.submit_prompt(prompt, line),
            None => self.execute_command(&line),
        }
    }

    fn execute_command(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if let Some(code) = self.selected_code() {
                self.use_response(&code);
            }
            return;
        }

        if let Some(term) = parse_search(trimmed) {
            self.run_search(term);
            return;
        }

        match trimmed.to_lowercase().as_str() {
            "sair" => self.should_quit = true,
            "add" => {
                self.show_view(View::Menu);
                self.open_prompt(Prompt::AddCode);
            }
            "template" => {
                self.show_view(View::Templates);
                self.open_prompt(Prompt::TemplateChoice);
            }
            "hist" => self.show_view(View::History),
            _ if self.assistant.contains(trimmed) => self.use_response(trimmed),
            _ => self.error(format!("✗ Comando ou código '{}' não reconhecido.", trimmed)),
        }
    }

    fn run_search(&mut self, term: &str) {
        if term.is_empty() {
            self.error("✗ Por favor, digite um termo para buscar.");
            return;
        }
        let codes: Vec<String> = self.assistant.search(term).into_keys().collect();
        if codes.is_empty() {
            self.error(format!("✗ Nenhuma resposta encontrada para '{}'.", term));
        } else {
            self.success(format!("{} resultado(s) para '{}'", codes.len(), term));
        }
        self.last_output = None;
        self.show_view(View::Search { term: term.to_string(), codes });
    }

    /// Copy a response, record its use and show it in the preview
    fn use_response(&mut self, code: &str) {
        let Some(response) = self.assistant.get_response(code) else {
            self.error(format!("✗ Resposta '{}' não encontrada.", code));
            return;
        };
        self.copy_output(format!("Resposta: {}", code), response.message, "✓ Resposta copiada!");
    }

    fn copy_output(&mut self, title: String, text: String, copied: &str) {
        match copy_with_provider(&text, self.clipboard.as_mut()) {
            Ok(()) => self.success(format!("{} Cole com Ctrl+V no chat.", copied)),
            Err(e) => self.error(format!("✗ Não foi possível copiar: {}", e)),
        }
        self.last_output = Some(Output { title, text });
    }

    fn submit_prompt(&mut self, prompt: Prompt, line: String) {
        match prompt {
            Prompt::AddCode => {
                let code = line.trim();
                if code.is_empty() {
                    self.error(format!("✗ {}", StoreError::EmptyCode));
                } else if self.assistant.contains(code) {
                    self.error("✗ Este código já existe. Escolha outro.");
                } else {
                    self.open_prompt(Prompt::AddCategory { code: code.to_string() });
                }
            }
            Prompt::AddCategory { code } => {
                let category = line.trim().to_string();
                self.open_prompt(Prompt::AddMessage { code, category });
            }
            Prompt::AddMessage { code, category } => {
                match self.assistant.add_response(&code, line.trim(), &category) {
                    Ok(added) => {
                        self.success(format!(
                            "✓ Resposta '{}' adicionada em '{}'.",
                            code, added.category
                        ));
                    }
                    Err(e) => self.error(format!("✗ {}", e)),
                }
            }
            Prompt::TemplateChoice => match self.resolve_template(line.trim()) {
                Some(name) => self.start_template(name),
                None => {
                    self.show_view(View::Menu);
                    self.error("✗ Template não encontrado.");
                }
            },
            Prompt::TemplateField { template, mut pending, mut bindings } => {
                if !pending.is_empty() {
                    bindings.insert(pending.remove(0), line);
                }
                if pending.is_empty() {
                    self.finish_template(&template, &bindings);
                } else {
                    self.open_prompt(Prompt::TemplateField { template, pending, bindings });
                }
            }
        }
    }

    /// Template by 1-based position or case-insensitive name
    fn resolve_template(&self, choice: &str) -> Option<String> {
        let names = self.assistant.templates().list();
        if let Ok(position) = choice.parse::<usize>() {
            return position.checked_sub(1).and_then(|i| names.get(i)).map(|n| n.to_string());
        }
        let choice = choice.to_lowercase();
        names.into_iter().find(|name| name.to_lowercase() == choice).map(str::to_string)
    }

    fn start_template(&mut self, template: String) {
        let pending =
            self.assistant.templates().placeholders(&template).map(<[String]>::to_vec).unwrap_or_default();
        if pending.is_empty() {
            self.finish_template(&template, &Bindings::new());
        } else {
            self.open_prompt(Prompt::TemplateField { template, pending, bindings: Bindings::new() });
        }
    }

    fn finish_template(&mut self, template: &str, bindings: &Bindings) {
        self.show_view(View::Menu);
        match self.assistant.fill_template(template, bindings) {
            Ok(message) => {
                self.copy_output(format!("Template: {}", template), message, "✓ Template copiado!")
            }
            Err(e) => self.error(format!("✗ {}", e)),
        }
    }

    /// Snapshot of everything the next frame draws
    fn render_state(&self) -> RenderState<'_> {
        let (list_title, rows, selected_row) = self.list_rows();

        RenderState {
            list_title,
            rows,
            selected_row,
            preview: self.preview(),
            input_label: self
                .prompt
                .as_ref()
                .map(Prompt::label)
                .unwrap_or_else(|| "Código da resposta ou comando".to_string()),
            input: &self.input,
            help: format!(
                "buscar <termo> | add | template | hist | sair | ↑↓ Enter: usar | Esc: voltar | {} respostas ({})",
                self.assistant.responses().len(),
                self.assistant.store_mode()
            ),
            status_message: self.status_message.as_ref(),
        }
    }

    fn list_rows(&self) -> (String, Vec<ListRow>, Option<usize>) {
        let mut rows = Vec::new();
        let mut selected_row = None;
        let mut push_item = |rows: &mut Vec<ListRow>, idx: usize, code: &str, message: &str| {
            if idx == self.selected_idx {
                selected_row = Some(rows.len());
            }
            rows.push(ListRow::Item(format!(
                "[{:.<20}] {}",
                code,
                display_snippet(message, LIST_PREVIEW_CHARS)
            )));
        };

        let title = match &self.view {
            View::Menu => {
                let mut idx = 0;
                for (category, members) in self.assistant.grouped_by_category() {
                    rows.push(ListRow::Header(strip_ansi_codes(&category).to_uppercase()));
                    for (code, response) in members {
                        push_item(&mut rows, idx, code, &response.message);
                        idx += 1;
                    }
                }
                "Categorias de respostas".to_string()
            }
            View::Search { term, codes } => {
                for (idx, code) in codes.iter().enumerate() {
                    if let Some(response) = self.assistant.peek(code) {
                        push_item(&mut rows, idx, code, &response.message);
                    }
                }
                if codes.is_empty() {
                    rows.push(ListRow::Note("Nenhuma resposta encontrada para esta busca.".to_string()));
                }
                format!("Busca: '{}' ({})", term, codes.len())
            }
            View::Templates => {
                for (i, template) in self.assistant.templates().templates().iter().enumerate() {
                    rows.push(ListRow::Note(format!(
                        "{:2}. {:<15} → {}",
                        i + 1,
                        template.name(),
                        template.pattern()
                    )));
                }
                "Templates disponíveis".to_string()
            }
            View::History => {
                let recent = self.assistant.recent_history(HISTORY_SHOWN);
                if recent.is_empty() {
                    rows.push(ListRow::Note("Nenhum registro no histórico ainda.".to_string()));
                    rows.push(ListRow::Note("As respostas usadas aparecerão aqui.".to_string()));
                }
                for (i, entry) in recent.iter().enumerate() {
                    rows.push(ListRow::Note(format!("{}. ⏰ {}", i + 1, entry.timestamp)));
                    rows.push(ListRow::Note(format!("   {}", strip_ansi_codes(&entry.context))));
                    rows.push(ListRow::Note(format!(
                        "   {}",
                        display_snippet(&entry.response, HISTORY_PREVIEW_CHARS)
                    )));
                }
                format!("Últimas {} respostas", recent.len())
            }
        };

        (title, rows, selected_row)
    }

    fn preview(&self) -> Preview {
        if let Some(Prompt::TemplateField { template, bindings, .. }) = &self.prompt {
            let mut lines = vec![self.assistant.templates().preview(template).unwrap_or("").to_string()];
            lines.push(String::new());
            let mut filled: Vec<_> = bindings.iter().collect();
            filled.sort();
            lines.extend(filled.into_iter().map(|(name, value)| format!("{}: {}", name, value)));
            return Preview::new(format!("Template: {}", template), lines);
        }

        if let Some(output) = &self.last_output {
            let lines = strip_ansi_codes(&output.text).lines().map(str::to_string).collect();
            return Preview::new(output.title.clone(), lines);
        }

        match self.selected_code().and_then(|code| self.assistant.peek(&code).map(|r| (code, r))) {
            Some((code, response)) => {
                let mut lines = vec![format!("Categoria: {}", strip_ansi_codes(&response.category)), String::new()];
                lines.extend(strip_ansi_codes(&response.message).lines().map(str::to_string));
                Preview::new(code, lines)
            }
            None => Preview::empty(),
        }
    }
}

/// Search term from `buscar <termo>`, matching the command case-insensitively
fn parse_search(line: &str) -> Option<&str> {
    let head = line.get(..SEARCH_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(SEARCH_PREFIX) {
        return None;
    }
    let rest = &line[SEARCH_PREFIX.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) { Some(rest.trim()) } else { None }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::clipboard::tests::MockClipboard;

    /// Clipboard whose contents stay visible to the test after boxing
    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<Option<String>>>);

    impl ClipboardProvider for SharedClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn app_with_clipboard() -> (App, SharedClipboard) {
        let clipboard = SharedClipboard::default();
        let app = App::new(Assistant::in_memory(), Box::new(clipboard.clone()));
        (app, clipboard)
    }

    fn type_line(app: &mut App, line: &str) {
        for c in line.chars() {
            app.handle_action(Action::Insert(c));
        }
        app.handle_action(Action::Submit);
    }

    fn status_text(app: &App) -> &str {
        app.status_message.as_ref().map(|m| m.text.as_str()).unwrap_or("")
    }

    #[test]
    fn test_app_new_initializes_state() {
        let (app, _) = app_with_clipboard();

        assert_eq!(app.view, View::Menu);
        assert_eq!(app.selected_idx, 0);
        assert!(app.input.is_empty());
        assert!(app.prompt.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_typing_and_delete() {
        let (mut app, _) = app_with_clipboard();

        app.handle_action(Action::Insert('h'));
        app.handle_action(Action::Insert('i'));
        assert_eq!(app.input, "hi");

        app.handle_action(Action::DeleteChar);
        assert_eq!(app.input, "h");

        app.handle_action(Action::ClearInput);
        assert!(app.input.is_empty());

        // Deleting from empty input is a no-op
        app.handle_action(Action::DeleteChar);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_input_length_is_capped() {
        let (mut app, _) = app_with_clipboard();
        for _ in 0..MAX_INPUT_CHARS + 10 {
            app.handle_action(Action::Insert('ç'));
        }
        assert_eq!(app.input.chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn test_exact_code_copies_and_records() {
        let (mut app, clipboard) = app_with_clipboard();

        type_line(&mut app, "saudacao");

        assert_eq!(clipboard.0.borrow().as_deref(), Some("Olá! Em que posso ajudar?"));
        assert!(status_text(&app).contains("Resposta copiada"));
        assert_eq!(app.assistant.recent_history(1)[0].context, "Resposta: saudacao");
        assert_eq!(
            app.last_output.as_ref().map(|o| o.title.as_str()),
            Some("Resposta: saudacao")
        );
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        let (mut app, clipboard) = app_with_clipboard();

        type_line(&mut app, "SAUDACAO");

        assert!(clipboard.0.borrow().is_none());
        assert!(status_text(&app).contains("não reconhecido"));
        assert!(app.assistant.history().is_empty());
    }

    #[test]
    fn test_enter_on_empty_line_uses_selection() {
        let (mut app, clipboard) = app_with_clipboard();

        // Menu order: acesso/senha_bloqueada, acompanhamento/follow_up, ...
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::Submit);

        let copied = clipboard.0.borrow().clone().unwrap();
        assert_eq!(copied, app.assistant.peek("follow_up").unwrap().message);
    }

    #[test]
    fn test_move_selection_bounds() {
        let (mut app, _) = app_with_clipboard();

        app.handle_action(Action::PageUp);
        assert_eq!(app.selected_idx, 0);

        app.handle_action(Action::PageDown);
        assert_eq!(app.selected_idx, 5);

        app.handle_action(Action::MoveDown);
        assert_eq!(app.selected_idx, 5);

        app.handle_action(Action::MoveUp);
        assert_eq!(app.selected_idx, 4);
    }

    #[test]
    fn test_search_command_is_case_insensitive() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "BUSCAR Conectividade");

        match &app.view {
            View::Search { term, codes } => {
                assert_eq!(term, "Conectividade");
                assert_eq!(codes, &vec!["problema_rede".to_string()]);
            }
            other => panic!("expected search view, got {:?}", other),
        }
        assert!(status_text(&app).contains("1 resultado"));
    }

    #[test]
    fn test_search_without_term() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "buscar   ");

        assert_eq!(app.view, View::Menu);
        assert!(status_text(&app).contains("digite um termo"));
    }

    #[test]
    fn test_search_no_results() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "buscar xyzzy");

        assert_eq!(app.view, View::Search { term: "xyzzy".to_string(), codes: vec![] });
        let (_, rows, selected) = app.list_rows();
        assert_eq!(selected, None);
        assert!(matches!(&rows[0], ListRow::Note(text) if text.contains("Nenhuma resposta")));
    }

    #[test]
    fn test_parse_search() {
        assert_eq!(parse_search("buscar rede"), Some("rede"));
        assert_eq!(parse_search("Buscar   senha  "), Some("senha"));
        assert_eq!(parse_search("buscar"), Some(""));
        assert_eq!(parse_search("buscarrede"), None);
        assert_eq!(parse_search("busca"), None);
        assert_eq!(parse_search("ação"), None);
    }

    #[test]
    fn test_add_dialog() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "ADD");
        assert_eq!(app.prompt, Some(Prompt::AddCode));

        type_line(&mut app, "problema_email");
        type_line(&mut app, "email");
        type_line(&mut app, "  Vou verificar sua caixa de entrada.  ");

        assert!(app.prompt.is_none());
        let added = app.assistant.peek("problema_email").unwrap();
        assert_eq!(added.message, "Vou verificar sua caixa de entrada.");
        assert_eq!(added.category, "email");
        assert!(status_text(&app).contains("adicionada"));
    }

    #[test]
    fn test_add_dialog_blank_category_defaults() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "add");
        type_line(&mut app, "novo");
        type_line(&mut app, "");
        type_line(&mut app, "Texto");

        assert_eq!(app.assistant.peek("novo").unwrap().category, "geral");
    }

    #[test]
    fn test_add_dialog_rejects_existing_code() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "add");
        type_line(&mut app, "saudacao");

        assert!(app.prompt.is_none());
        assert!(status_text(&app).contains("já existe"));
        assert_eq!(app.assistant.peek("saudacao").unwrap().message, "Olá! Em que posso ajudar?");
    }

    #[test]
    fn test_add_dialog_rejects_empty_fields() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "add");
        type_line(&mut app, "   ");
        assert!(app.prompt.is_none());
        assert!(status_text(&app).contains("Código não pode estar vazio"));

        type_line(&mut app, "add");
        type_line(&mut app, "vazio");
        type_line(&mut app, "geral");
        type_line(&mut app, "   ");
        assert!(status_text(&app).contains("Mensagem não pode estar vazia"));
        assert!(!app.assistant.contains("vazio"));
    }

    #[test]
    fn test_template_dialog_by_number() {
        let (mut app, clipboard) = app_with_clipboard();

        type_line(&mut app, "template");
        assert_eq!(app.view, View::Templates);
        assert_eq!(app.prompt, Some(Prompt::TemplateChoice));

        type_line(&mut app, "1");
        assert_eq!(
            app.prompt.as_ref().map(Prompt::label).as_deref(),
            Some(field_label("setor"))
        );

        type_line(&mut app, "Financeiro");
        type_line(&mut app, "12345");

        assert_eq!(
            clipboard.0.borrow().as_deref(),
            Some("Estou encaminhando seu caso para o setor Financeiro. O protocolo é 12345.")
        );
        assert!(status_text(&app).contains("Template copiado"));
        assert_eq!(app.view, View::Menu);
    }

    #[test]
    fn test_template_dialog_without_fields() {
        let (mut app, clipboard) = app_with_clipboard();

        type_line(&mut app, "template");
        type_line(&mut app, "Aguardando");

        assert!(app.prompt.is_none());
        let copied = clipboard.0.borrow().clone().unwrap();
        assert_eq!(copied, app.assistant.templates().preview("aguardando").unwrap());
    }

    #[test]
    fn test_template_dialog_unknown_choice() {
        let (mut app, clipboard) = app_with_clipboard();

        type_line(&mut app, "template");
        type_line(&mut app, "99");

        assert!(app.prompt.is_none());
        assert!(status_text(&app).contains("Template não encontrado"));
        assert!(clipboard.0.borrow().is_none());

        type_line(&mut app, "template");
        type_line(&mut app, "0");
        assert!(status_text(&app).contains("Template não encontrado"));
    }

    #[test]
    fn test_template_field_preview_shows_pattern() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "template");
        type_line(&mut app, "atualizacao");
        type_line(&mut app, "789");

        let preview = app.preview();
        assert_eq!(preview.title, "Template: atualizacao");
        assert!(preview.lines[0].contains("{status}"));
        assert!(preview.lines.contains(&"caso: 789".to_string()));
    }

    #[test]
    fn test_history_view() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "hist");
        let (_, rows, _) = app.list_rows();
        assert!(matches!(&rows[0], ListRow::Note(text) if text.contains("Nenhum registro")));

        app.handle_action(Action::Cancel);
        type_line(&mut app, "lentidao");
        type_line(&mut app, "saudacao");
        type_line(&mut app, "Hist");

        let (title, rows, _) = app.list_rows();
        assert_eq!(title, "Últimas 2 respostas");
        // Newest first
        assert!(matches!(&rows[1], ListRow::Note(text) if text.contains("Resposta: saudacao")));
        assert!(matches!(&rows[4], ListRow::Note(text) if text.contains("Resposta: lentidao")));
    }

    #[test]
    fn test_escape_backs_out_one_level() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "add");
        app.handle_action(Action::Insert('x'));
        app.handle_action(Action::Cancel);
        assert!(app.prompt.is_none());
        assert!(app.input.is_empty());
        assert!(!app.should_quit);

        type_line(&mut app, "hist");
        app.handle_action(Action::Insert('x'));
        app.handle_action(Action::Cancel);
        assert_eq!(app.view, View::History);

        app.handle_action(Action::Cancel);
        assert_eq!(app.view, View::Menu);

        app.handle_action(Action::Cancel);
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_commands() {
        let (mut app, _) = app_with_clipboard();
        type_line(&mut app, "SAIR");
        assert!(app.should_quit);

        let (mut app, _) = app_with_clipboard();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_clipboard_failure_still_shows_text() {
        let mut app = App::new(Assistant::in_memory(), Box::new(MockClipboard::with_failure()));

        type_line(&mut app, "agradecimento");

        assert!(status_text(&app).contains("Não foi possível copiar"));
        let preview = app.preview();
        assert_eq!(preview.title, "Resposta: agradecimento");
        assert!(preview.lines[0].starts_with("Obrigado"));
        assert_eq!(app.assistant.recent_history(5).len(), 1);
    }

    #[test]
    fn test_unavailable_clipboard_is_announced() {
        let app = App::new(Assistant::in_memory(), Box::new(crate::clipboard::NullClipboard));
        assert!(status_text(&app).contains("indisponível"));

        let (app, _) = app_with_clipboard();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_escape_sequences_are_not_rendered() {
        let (mut app, _) = app_with_clipboard();
        app.assistant.add_response("cor", "\x1b[2JTexto\x1b[0m limpo", "\x1b[31mvisual").unwrap();

        type_line(&mut app, "cor");

        assert_eq!(app.preview().lines, vec!["Texto limpo".to_string()]);
        let (_, rows, _) = app.list_rows();
        assert!(rows.contains(&ListRow::Header("VISUAL".to_string())));
    }

    #[test]
    fn test_menu_rows_group_by_category() {
        let (app, _) = app_with_clipboard();

        let (_, rows, selected) = app.list_rows();

        assert_eq!(rows[0], ListRow::Header("ACESSO".to_string()));
        assert!(matches!(&rows[1], ListRow::Item(text) if text.starts_with("[senha_bloqueada")));
        assert_eq!(selected, Some(1));
        let headers = rows.iter().filter(|r| matches!(r, ListRow::Header(_))).count();
        assert_eq!(headers, 5);
    }

    #[test]
    fn test_selection_clears_last_output() {
        let (mut app, _) = app_with_clipboard();

        type_line(&mut app, "saudacao");
        assert!(app.last_output.is_some());

        app.handle_action(Action::MoveDown);
        assert!(app.last_output.is_none());
        assert_eq!(app.preview().title, "follow_up");
    }

    #[test]
    fn test_render_state_draws() {
        let (mut app, _) = app_with_clipboard();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        let state = app.render_state();
        terminal.draw(|f| render_ui(f, &state)).unwrap();
        drop(state);

        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
