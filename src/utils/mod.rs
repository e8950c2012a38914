pub mod environment;
pub mod files;
pub mod terminal;

pub use environment::{default_data_dir, env_override};
pub use files::{atomic_write, format_path_with_tilde, validate_file_size};
pub use terminal::{display_snippet, strip_ansi_codes, truncate_chars};
