pub mod ntfy;
