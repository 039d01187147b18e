use std::{
    fmt,
    ops::{Mul, MulAssign},
};

use bytemuck::{Pod, Zeroable};
use cgmath::{Angle, Deg, Rad};

/// A row-major 4x4 matrix.
///
/// The rows are handed to the vertex shader as-is, so a shader `mat4` sees them as columns.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Transform(pub [[f32; 4]; 4]);

impl Transform {
    pub const IDENTITY: Transform = Transform([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Composite rotation built from three Euler angles in degrees, applied as `Z * X * Y`.
    pub fn rotation(deg_z: f32, deg_x: f32, deg_y: f32) -> Self {
        let (sin_z, cos_z) = sin_cos(deg_z);
        let (sin_x, cos_x) = sin_cos(deg_x);
        let (sin_y, cos_y) = sin_cos(deg_y);

        let z = Transform([
            [cos_z, -sin_z, 0.0, 0.0],
            [sin_z, cos_z, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let x = Transform([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos_x, -sin_x, 0.0],
            [0.0, sin_x, cos_x, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let y = Transform([
            [cos_y, 0.0, -sin_y, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [sin_y, 0.0, cos_y, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        z * x * y
    }

    /// Composes a rotation into this transform in place.
    pub fn rotate(&mut self, deg_z: f32, deg_x: f32, deg_y: f32) {
        *self *= Transform::rotation(deg_z, deg_x, deg_y);
    }

    pub fn column(&self, index: usize) -> [f32; 4] {
        [
            self.0[0][index],
            self.0[1][index],
            self.0[2][index],
            self.0[3][index],
        ]
    }

    pub fn approx_eq(&self, other: &Transform, epsilon: f32) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

fn sin_cos(degrees: f32) -> (f32, f32) {
    let (sin, cos) = Rad::from(Deg(degrees as f64)).sin_cos();
    (sin as f32, cos as f32)
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

impl MulAssign for Transform {
    fn mul_assign(&mut self, rhs: Transform) {
        let mut result = [[0.0f32; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
            }
        }
        self.0 = result;
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(mut self, rhs: Transform) -> Transform {
        self *= rhs;
        self
    }
}

impl From<Transform> for [[f32; 4]; 4] {
    fn from(value: Transform) -> Self {
        value.0
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Matrix4, Vector3};

    use super::*;

    const EPSILON: f32 = 1e-5;

    fn sample() -> Transform {
        Transform([
            [1.0, 2.0, 3.0, 4.0],
            [-5.0, 6.5, 7.0, 0.25],
            [9.0, -10.0, 11.0, 12.0],
            [0.5, 14.0, -15.0, 16.0],
        ])
    }

    fn axis(transform: &Transform, index: usize) -> Vector3<f32> {
        let column = transform.column(index);
        Vector3::new(column[0], column[1], column[2])
    }

    #[test]
    fn identity_is_neutral() {
        let m = sample();
        assert_eq!(Transform::IDENTITY * m, m);
        assert_eq!(m * Transform::IDENTITY, m);
    }

    #[test]
    fn multiply_assigns_into_first_operand() {
        let mut a = sample();
        let b = Transform::rotation(30.0, 45.0, 60.0);
        let expected = a * b;
        a *= b;
        assert_eq!(a, expected);
    }

    #[test]
    fn multiply_matches_cgmath() {
        let a = sample();
        let b = Transform::rotation(10.0, 20.0, 30.0);

        // cgmath reads each inner array as a column, so it sees the transposes.
        let expected = Matrix4::from(b.0) * Matrix4::from(a.0);
        let actual = Matrix4::from((a * b).0);

        for col in 0..4 {
            for row in 0..4 {
                assert!((expected[col][row] - actual[col][row]).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn full_turn_on_each_axis_is_identity() {
        for rotation in [
            Transform::rotation(360.0, 0.0, 0.0),
            Transform::rotation(0.0, 360.0, 0.0),
            Transform::rotation(0.0, 0.0, 360.0),
            Transform::rotation(360.0, 360.0, 360.0),
        ] {
            assert!(
                rotation.approx_eq(&Transform::IDENTITY, EPSILON),
                "{rotation:?}"
            );
        }
    }

    #[test]
    fn rotations_are_orthonormal() {
        for (z, x, y) in [
            (0.0, 0.0, 0.0),
            (90.0, 0.0, 0.0),
            (12.5, 77.0, -33.0),
            (200.0, 1.0, 359.0),
        ] {
            let rotation = Transform::rotation(z, x, y);
            let axes = [axis(&rotation, 0), axis(&rotation, 1), axis(&rotation, 2)];

            for a in &axes {
                assert!((a.magnitude() - 1.0).abs() < EPSILON);
            }
            assert!(axes[0].dot(axes[1]).abs() < EPSILON);
            assert!(axes[0].dot(axes[2]).abs() < EPSILON);
            assert!(axes[1].dot(axes[2]).abs() < EPSILON);
        }
    }

    #[test]
    fn rotation_composes_z_then_x_then_y() {
        let composed = Transform::rotation(15.0, 25.0, 35.0);
        let manual = Transform::rotation(15.0, 0.0, 0.0)
            * Transform::rotation(0.0, 25.0, 0.0)
            * Transform::rotation(0.0, 0.0, 35.0);
        assert!(composed.approx_eq(&manual, EPSILON));
    }

    #[test]
    fn quarter_turn_about_z() {
        let rotation = Transform::rotation(90.0, 0.0, 0.0);
        let expected = Transform([
            [0.0, -1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!(rotation.approx_eq(&expected, EPSILON));
    }

    #[test]
    fn opposite_rotations_cancel() {
        let mut transform = Transform::IDENTITY;
        transform.rotate(0.0, 0.0, 1.0);
        transform.rotate(0.0, 0.0, -1.0);
        assert!(transform.approx_eq(&Transform::IDENTITY, EPSILON));
    }
}
