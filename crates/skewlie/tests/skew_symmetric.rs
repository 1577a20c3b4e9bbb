use approx::assert_relative_eq;
use rand::Rng;
use skewlie::{SkewAlgebraError, SkewSymmetricMatrices};
use skewlie_tensor::{Tensor1, Tensor2};
use skewlie_tensor_ops::{ops, Backend, CpuBackend};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const N_SEQ: std::ops::RangeInclusive<usize> = 2..=10;

fn assert_close(x: &Tensor2<f64>, y: &Tensor2<f64>) {
    assert_eq!(x.shape, y.shape);
    for (a, b) in x.iter().zip(y.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn basis_is_skew_symmetric() -> TestResult {
    for n in N_SEQ {
        let skew = SkewSymmetricMatrices::new(n)?;
        let flags = skew.belongs_batch(skew.basis());
        assert_eq!(flags.len(), skew.dim());
        assert!(flags.into_iter().all(|b| b), "basis of so({n}) is not skew");
    }
    Ok(())
}

#[test]
fn basis_has_the_right_dimension() -> TestResult {
    for n in N_SEQ {
        let skew = SkewSymmetricMatrices::new(n)?;
        assert_eq!(skew.dim(), n * (n - 1) / 2);
        assert_eq!(skew.basis().shape, [n * (n - 1) / 2, n, n]);
    }
    Ok(())
}

#[test]
fn basis_elements_have_one_pair_of_units() -> TestResult {
    for n in N_SEQ {
        let skew = SkewSymmetricMatrices::new(n)?;
        for (k, (i, j)) in skew.index_pairs().iter().enumerate() {
            let e = skew.basis_element(k).ok_or("missing basis element")?;
            assert_eq!(e.get([i, j]), Some(&1.0));
            assert_eq!(e.get([j, i]), Some(&-1.0));
            assert_eq!(e.iter().filter(|&&x| x != 0.0).count(), 2);
        }
    }
    Ok(())
}

#[test]
fn bch_up_to_fourth_order_works() -> TestResult {
    let backend = CpuBackend;
    for n in 3..=10 {
        let skew = SkewSymmetricMatrices::new(n)?;
        let first = skew.basis_element(0).ok_or("missing basis element")?;
        let second = skew.basis_element(1).ok_or("missing basis element")?;

        let mut expected = backend.add(&first, &second)?;
        let result = skew.baker_campbell_hausdorff(&first, &second, 1)?;
        assert_close(&expected, &result);

        let lb_first_second = skew.bracket(&first, &second)?;
        expected = backend.add(&expected, &backend.scale(&lb_first_second, 0.5))?;
        let result = skew.baker_campbell_hausdorff(&first, &second, 2)?;
        assert_close(&expected, &result);

        let first_lb = skew.bracket(&first, &lb_first_second)?;
        let second_lb = skew.bracket(&second, &lb_first_second)?;
        expected = backend.add(&expected, &backend.scale(&first_lb, 1.0 / 12.0))?;
        expected = backend.sub(&expected, &backend.scale(&second_lb, 1.0 / 12.0))?;
        let result = skew.baker_campbell_hausdorff(&first, &second, 3)?;
        assert_close(&expected, &result);

        let second_first_lb = skew.bracket(&second, &first_lb)?;
        expected = backend.sub(&expected, &backend.scale(&second_first_lb, 1.0 / 24.0))?;
        let result = skew.baker_campbell_hausdorff(&first, &second, 4)?;
        assert_close(&expected, &result);
    }
    Ok(())
}

#[test]
fn basis_representation_is_correctly_vectorized() -> TestResult {
    for n in N_SEQ {
        let skew = SkewSymmetricMatrices::new(n)?;
        let coords = skew.basis_representation_batch(skew.basis())?;
        let dim = n * (n - 1) / 2;
        assert_eq!(coords.shape, [dim, dim]);
    }
    Ok(())
}

#[test]
fn matrix_and_basis_representation() -> TestResult {
    let mut rng = rand::rng();
    for n in N_SEQ {
        let skew = SkewSymmetricMatrices::new(n)?;
        let data = (0..skew.dim()).map(|_| rng.random::<f64>()).collect();
        let vec = Tensor1::from_shape_vec([skew.dim()], data)?;
        let mat = skew.matrix_representation(&vec)?;
        assert!(skew.belongs(&mat));
        let result = skew.basis_representation(&mat)?;
        for (x, y) in result.iter().zip(vec.iter()) {
            assert_relative_eq!(*x, *y);
        }
    }
    Ok(())
}

#[test]
fn belongs() -> TestResult {
    let mat = Tensor2::from_shape_vec([2, 2], vec![0.0, -1.0, 1.0, 0.0])?;
    assert!(SkewSymmetricMatrices::new(2)?.belongs(&mat));

    let mat = Tensor2::from_shape_vec([3, 2], vec![0.0, -1.0, 1.0, 0.0, 0.0, 0.0])?;
    assert!(!SkewSymmetricMatrices::new(2)?.belongs(&mat));
    assert!(!SkewSymmetricMatrices::new(3)?.belongs(&mat));

    let mat = Tensor2::from_shape_vec([2, 3], vec![0.0, -1.0, 0.0, 1.0, 0.0, 0.0])?;
    assert!(!SkewSymmetricMatrices::new(2)?.belongs(&mat));
    assert!(!SkewSymmetricMatrices::new(3)?.belongs(&mat));
    Ok(())
}

#[test]
fn random_point_and_belongs() -> TestResult {
    let skew = SkewSymmetricMatrices::new(3)?;
    let matrices = skew.random_points(4)?;
    assert_eq!(matrices.shape, [4, 3, 3]);
    assert!(skew.belongs_batch(&matrices).into_iter().all(|b| b));

    for k in [1, 2, 7] {
        let points = skew.random_points(k)?;
        assert_eq!(skew.belongs_batch(&points), vec![true; k]);
    }
    Ok(())
}

#[test]
fn bracket_is_closed() -> TestResult {
    for n in N_SEQ {
        let skew = SkewSymmetricMatrices::new(n)?;
        let a = skew.random_points(5)?;
        let b = skew.random_points(5)?;
        let c = skew.bracket_batch(&a, &b)?;
        assert!(skew.belongs_batch(&c).into_iter().all(|x| x));

        for order in 1..=4 {
            let z = skew.baker_campbell_hausdorff_batch(&a, &b, order)?;
            assert!(skew.belongs_batch(&z).into_iter().all(|x| x));
        }
    }
    Ok(())
}

#[test]
fn bracket_satisfies_jacobi_identity() -> TestResult {
    let skew = SkewSymmetricMatrices::new(5)?;
    let x = skew.random_point()?;
    let y = skew.random_point()?;
    let z = skew.random_point()?;

    let xyz = skew.bracket(&x, &skew.bracket(&y, &z)?)?;
    let yzx = skew.bracket(&y, &skew.bracket(&z, &x)?)?;
    let zxy = skew.bracket(&z, &skew.bracket(&x, &y)?)?;
    let total = ops::add(&ops::add(&xyz, &yzx)?, &zxy)?;
    assert!(total.iter().all(|v| v.abs() < 1e-10));
    Ok(())
}

#[test]
fn construction_errors() {
    assert_eq!(
        SkewSymmetricMatrices::new(1).err(),
        Some(SkewAlgebraError::InvalidDimension(1))
    );
}
