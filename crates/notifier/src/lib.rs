//! Fan-out notifier: converts one ride-created event into push deliveries
//! for every other registered user, excluding the ride's creator.

pub mod directory;
pub mod fanout;
pub mod transport;
