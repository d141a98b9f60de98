pub mod fragment;
pub mod inspect;
