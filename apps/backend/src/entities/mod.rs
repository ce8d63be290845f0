pub mod games;
pub mod turns;

pub use games::Entity as Games;
pub use games::Model as Game;
pub use turns::Entity as Turns;
pub use turns::Model as Turn;
