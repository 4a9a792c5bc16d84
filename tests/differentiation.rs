use hyperdual::{
    derivative::{derivative, derivatives, directional_derivative, gradient, nth_derivative},
    domains::{
        dual::Dual,
        float::{NumericalFloatLike, Real},
        hyperdual::Hyperdual,
    },
    AlgebraError,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-10 * a.abs().max(b.abs()).max(1.)
}

fn f<T: Real>(x: T) -> T {
    x.pow(2) * x.sin() + x.clone().exp() / (x.cos() + 3.)
}

#[test]
fn generic_functions() {
    let x = 0.7f64;
    let value = f(x);
    assert!(close(derivatives(f, x, 0)[0], value));

    // f'(x) = 2x sin(x) + x^2 cos(x) + e^x / (cos(x) + 3) + e^x sin(x) / (cos(x) + 3)^2
    let c = x.cos() + 3.;
    let expected = 2. * x * x.sin()
        + x * x * x.cos()
        + x.exp() / c
        + x.exp() * x.sin() / (c * c);
    assert!(close(derivative(f, x), expected));
    assert!(close(nth_derivative(f, x, 1), expected));
}

#[test]
fn higher_orders_of_exp() {
    let d = derivatives(|x: Hyperdual<f64>| (x * 2.).exp(), 0.5, 6);
    for (i, c) in d.iter().enumerate() {
        assert!(close(*c, 2f64.powi(i as i32) * 1f64.exp()));
    }
}

#[test]
fn higher_orders_of_trigonometric_functions() {
    let x = 1.1f64;
    let sin = derivatives(|x: Hyperdual<f64>| x.sin(), x, 5);
    let cos = derivatives(|x: Hyperdual<f64>| x.cos(), x, 5);

    let expected_sin = [x.sin(), x.cos(), -x.sin(), -x.cos(), x.sin(), x.cos()];
    let expected_cos = [x.cos(), -x.sin(), -x.cos(), x.sin(), x.cos(), -x.sin()];
    for i in 0..6 {
        assert!(close(sin[i], expected_sin[i]));
        assert!(close(cos[i], expected_cos[i]));
    }
}

#[test]
fn quotient() {
    // d^2/dx^2 1/(1 + x^2) = (6x^2 - 2)/(1 + x^2)^3
    let x = 0.4f64;
    let d = nth_derivative(|x: Hyperdual<f64>| 1. / (x.pow(2) + 1.), x, 2);
    assert!(close(d, (6. * x * x - 2.) / (1. + x * x).powi(3)));
}

#[test]
fn rosenbrock() {
    fn rosenbrock(x: &[Dual<f64>]) -> Dual<f64> {
        (1. - x[0]).pow(2) + (x[1] - x[0].pow(2)).pow(2) * 100.
    }

    let g = gradient(rosenbrock, &[1., 1.]);
    assert_eq!(g, vec![0., 0.]);

    let g = gradient(rosenbrock, &[0., 0.]);
    assert_eq!(g, vec![-2., 0.]);

    assert_eq!(
        directional_derivative(rosenbrock, &[0., 0.], Some(&[0., -2.])),
        Ok(0.)
    );
    assert_eq!(
        directional_derivative(rosenbrock, &[0., 0.], Some(&[]))
            .map_err(|e| e.to_string()),
        Err("Dimension mismatch: expected 2 components, found 0".to_owned())
    );
}

fn reciprocal<T: Real>(x: T) -> T {
    x.one() / (x * 1e-9 + 1e-6)
}

#[test]
fn small_divisors() {
    let d1 = derivative(reciprocal, 0.);
    let d2 = nth_derivative(reciprocal, 0., 1);
    assert!(close(d1, -1000.));
    assert!(close(d1, d2));

    let d = derivatives(reciprocal, 0., 2);
    assert!(close(d[0], 1e6));
    assert!(close(d[2], 2.));
}

#[test]
fn division_errors() {
    let a = Dual::new(1., 0.);
    let b = Dual::new(0., 0.);
    assert_eq!(a.try_div(&b), Err(AlgebraError::DivisionByZero));

    let a = Hyperdual::new([0., 1., 2.]);
    let b = Hyperdual::new([0., 2., 3.]);
    assert_eq!(
        a.try_div(&b),
        Ok(Hyperdual::new([1., 2.]) / Hyperdual::new([2., 3.]))
    );
}
