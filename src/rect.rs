use crate::vec2::Vec2;

#[repr(C)]
#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub struct Rect {
    pub position: Vec2<f32>,
    pub size: Vec2<f32>,
}

impl Rect {
    #[inline]
    pub fn new(position: Vec2<f32>, size: Vec2<f32>) -> Self {
        Rect { position, size }
    }

    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(Vec2::new(x, y), Vec2::new(width, height))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x()
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y()
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x() + self.size.x()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y() + self.size.y()
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Grows the rect by `margin` on every side; negative margins shrink it.
    pub fn inflate(&self, margin: f32) -> Self {
        Rect::from_xywh(
            self.x() - margin,
            self.y() - margin,
            (self.width() + margin * 2.0).max(0.0),
            (self.height() + margin * 2.0).max(0.0),
        )
    }

    #[inline]
    #[rustfmt::skip]
    pub fn intersects(&self, rect: &Self) -> bool {
        let x  = ((self.x() + self.width() / 2.0) - (rect.x() + rect.width() / 2.0)).abs() * 2.0 < (self.width() + rect.width());
        let y = ((self.y() + self.height() / 2.0) - (rect.y() + rect.height() / 2.0)).abs() * 2.0 < (self.height() + rect.height());
        x && y
    }

    pub fn intersection(&self, rect: &Self) -> Option<Rect> {
        if !self.intersects(rect) {
            return None;
        }
        let left = self.left().max(rect.left());
        let top = self.top().max(rect.top());
        let right = self.right().min(rect.right());
        let bottom = self.bottom().min(rect.bottom());
        Some(Rect::from_xywh(left, top, right - left, bottom - top))
    }
}
