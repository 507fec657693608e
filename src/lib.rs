pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod tolerance;

    pub mod curve {
        pub mod curve;

        pub mod basic {
            pub mod logcurve;
        }

        pub mod tabulatedcurve {
            pub mod point2d;
            pub mod tabulatedcurveerror;
            pub mod tabulatedcurve;
            pub mod arraytabulatedcurve;
            pub mod linkedlisttabulatedcurve;
            pub mod tabulatedcurves;
            pub mod tabulatedcurvemanager;
        }

        pub mod transformedcurve {
            pub mod powercurve;
            pub mod scalecurve;
            pub mod shiftcurve;
        }
    }
}
