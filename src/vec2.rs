#[repr(C)]
#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub struct Vec2<T> {
    inner: [T; 2],
}

impl<T: Copy> Vec2<T> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { inner: [x, y] }
    }

    #[inline]
    pub fn x(&self) -> T {
        self.inner[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.inner[1]
    }
}
