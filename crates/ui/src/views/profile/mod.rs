mod languages;
mod view;
mod vocabulary;

pub use view::ProfileView;
