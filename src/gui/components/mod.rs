pub mod form_field;
