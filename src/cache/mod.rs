pub mod computed;
