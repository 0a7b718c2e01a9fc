pub mod configuration;

pub mod chart {
    pub mod displayconfig;
    pub mod lorenzchart;
}

pub mod lorenz {
    pub mod inequalityerror;
    pub mod series;
    pub mod lorenzcurve;
    pub mod curvebuilder;
    pub mod inequalityanalyzer;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewisepolynomial;
        }
    }
    pub mod integration;
    pub mod rootfinding;
    pub mod round;
}
