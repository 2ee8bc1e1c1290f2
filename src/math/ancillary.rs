/// The Gudermannian function (often written as gd), is the work horse for computations involving
/// the isometric latitude (i.e. the vertical coordinate of the Mercator projection)
pub mod gudermannian {
    pub fn fwd(arg: f64) -> f64 {
        arg.sinh().atan()
    }

    pub fn inv(arg: f64) -> f64 {
        arg.tan().asinh()
    }
}

/// The function ts(𝜙) of Snyder (1987), Eq. (7-10), i.e. the exponential
/// of the negated isometric latitude, exp(-𝜓), evaluated in a numerically
/// stable way. `sincos` holds the trigs of the geographic latitude, `e` is
/// the eccentricity of the ellipsoid.
pub fn ts(sincos: (f64, f64), e: f64) -> f64 {
    //    cos 𝜙 / (1 + sin 𝜙)  good for 𝜙 > 0
    //    (1 - sin 𝜙) / cos 𝜙  good for 𝜙 < 0
    let factor = if sincos.0 > 0. {
        sincos.1 / (1. + sincos.0)
    } else {
        (1. - sincos.0) / sincos.1
    };
    (e * (e * sincos.0).atanh()).exp() * factor
}

/// Snyder (1987) eq. 14-15: cos 𝜙 / sqrt(1 - e² sin² 𝜙)
pub fn msfn(sincos: (f64, f64), es: f64) -> f64 {
    sincos.1 / (1. - sincos.0 * sincos.0 * es).sqrt()
}

/// The geographic latitude corresponding to ts = exp(-𝜓)
pub fn ts_to_latitude(ts0: f64, e: f64) -> f64 {
    sinhpsi_to_tanphi((1. / ts0 - ts0) / 2., e).atan()
}

/// Newton iteration for tan 𝜙, given sinh 𝜓. Follows
/// [Karney, 2011](crate::Bibliography::Kar11).
pub fn sinhpsi_to_tanphi(taup: f64, e: f64) -> f64 {
    // Normally converges in one or two iterations
    const MAX_ITER: usize = 5;

    let rooteps: f64 = f64::EPSILON.sqrt();
    let tol: f64 = rooteps / 10.;
    let tmax: f64 = 2. / rooteps;

    let e2m = 1. - e * e;
    let stol = tol * taup.abs().max(1.0);

    // Initial guess. 70 corresponds to 𝜒 = 89.18°
    let mut tau = if taup.abs() > 70. {
        taup * (e * e.atanh()).exp()
    } else {
        taup / e2m
    };

    // +/-inf and nan
    if (tau.abs() >= tmax) || tau.is_nan() {
        return tau;
    }

    for _ in 0..MAX_ITER {
        let tau1 = (1. + tau * tau).sqrt();
        let sig = (e * (e * tau / tau1).atanh()).sinh();
        let taupa = (1. + sig * sig).sqrt() * tau - sig * tau1;
        let dtau =
            (taup - taupa) * (1. + e2m * (tau * tau)) / (e2m * tau1 * (1. + taupa * taupa).sqrt());
        tau += dtau;

        if (dtau.abs() < stol) || tau.is_nan() {
            return tau;
        }
    }
    f64::NAN
}

// ----- T E S T S ---------------------------------------------------------------------
