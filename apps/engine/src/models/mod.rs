pub mod analysis;
pub mod cms;
pub mod resume;
