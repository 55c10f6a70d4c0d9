pub mod undoable;
