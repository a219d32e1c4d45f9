/// A trait for sources of uniformly random values.
///
/// Series code drawing is abstracted over this so tests can script the
/// random stream and force collisions deterministically.
pub trait RandSource<T> {
    /// Returns a uniformly random value.
    fn rand(&self) -> T;
}
