pub mod choice_input;
