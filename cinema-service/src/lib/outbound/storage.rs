pub mod photo;

pub use photo::LocalPhotoStorage;
