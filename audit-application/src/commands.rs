pub mod detection_commands;
pub mod import_commands;
