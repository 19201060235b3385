//! Narrow storage seam between the services and wherever the image list lives.

pub mod image_store;
