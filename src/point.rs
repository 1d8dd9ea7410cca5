use fast_inv_sqrt::InvSqrt64;
use num_traits::Num;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Div, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Point<T: Display + Num + Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Display + Num + Copy> Display for Point<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: Display + Num + Copy> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
    pub fn map_both<P: Display + Num + Copy, F: Fn(T) -> P>(self, func: F) -> Point<P> {
        //! Great for unit conversion:
        //! ```
        //! use robust_spn_anim::Point;
        //! let point = Point::new(1.5, 2.0);
        //! let pixels: Point<u32> = point.map_both(|v| v as u32);
        //! assert_eq!(pixels, Point::new(1, 2));
        //! ```
        Point::new(func(self.x), func(self.y))
    }
    pub fn length_squared(self) -> T {
        self.x * self.x + self.y * self.y
    }
}

impl Point<f64> {
    pub fn length(self) -> f64 {
        let squared = self.length_squared();
        if squared == 0.0 {
            return 0.0;
        }
        1.0 / squared.inv_sqrt64()
    }
    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }
    /// Component-wise absolute value.
    pub fn abs(self) -> Self {
        Point::new(self.x.abs(), self.y.abs())
    }
    /// Component-wise maximum against a scalar.
    pub fn max_scalar(self, v: f64) -> Self {
        Point::new(self.x.max(v), self.y.max(v))
    }
    /// Moves `self` toward (factor < 1) or away from (factor > 1) `center`.
    pub fn scale_about(self, center: Self, factor: f64) -> Self {
        center + (self - center) * factor
    }
}

impl<T: Display + Num + Copy> Add<Point<T>> for Point<T> {
    type Output = Self;

    fn add(self, rhs: Point<T>) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Display + Num + Copy> Sub<Point<T>> for Point<T> {
    type Output = Self;

    fn sub(self, rhs: Point<T>) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Display + Num + Copy> Mul<T> for Point<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Display + Num + Copy> Div<T> for Point<T> {
    type Output = Point<T>;

    fn div(self, rhs: T) -> Self::Output {
        Point::new(self.x / rhs, self.y / rhs)
    }
}
