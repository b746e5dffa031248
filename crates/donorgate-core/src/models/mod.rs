pub mod appointment;
pub mod declaration;
pub mod draft;
pub mod record;
