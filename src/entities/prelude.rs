pub use super::simulations::Entity as Simulations;
