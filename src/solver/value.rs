/// The base trait for any value that can appear in a variable's domain.
///
/// This establishes the minimum requirements for a value: it must be
/// cloneable, debuggable, equatable, and hashable. It is a marker trait, so
/// any type that satisfies these bounds implements `Value`.
pub trait Value: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> Value for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
