/// The datatype lattice.
///
/// Defines `Datatype` and every built-in datatype as a static node of the
/// lattice: `any` at the root, the abstract `number` above `int` and `float`,
/// and the concrete containers. Each datatype owns its cast and display
/// functions.
pub mod datatype;
/// Set value representation.
///
/// Defines the `SetValue` type, which is used for the elements of a
/// `set` payload. Ensures that set elements are hashable and unique.
pub mod set_value;

pub mod core;
