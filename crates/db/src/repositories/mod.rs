mod application;

pub use application::ApplicationRepository;
