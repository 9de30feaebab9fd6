// Services layer - hashing gate and identifier generation
pub mod credential;
pub mod registration;
