pub mod mime_types;
