pub mod in_memory;
pub mod notifier;
pub mod scripted;
