// src/types/mod.rs
pub mod response;
pub mod resume;

pub use resume::{Item, ResumeRecord, Section, SectionKind, SocialLink};
