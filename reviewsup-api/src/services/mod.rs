//! Domain services: showcase assembly, embedding verification, and
//! new-account default data seeding

pub mod composer;
pub mod default_data;
pub mod embed_verifier;
pub mod renderer_client;
