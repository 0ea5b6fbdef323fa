//! Sample tracker output for tests.
//!
//! Each module holds a small, hand-checked file body in one format. The
//! values are taken from Hurricane Isaac (09L, 2012) and Irene (09L, 2005)
//! style records so that the expected parse results can be read off the
//! text.

/// Common geographic limits for filtering tests, as `N,S,W,E` strings.
pub mod bounds {
    /// Gulf of Mexico and western Caribbean.
    pub const GULF: &str = "31,15,-98,-75";

    /// Tropical Atlantic main development region.
    pub const MDR: &str = "20,10,-60,-20";

    /// Crosses the antimeridian.
    pub const DATELINE: &str = "40,0,160,-140";

    /// Only a northern edge.
    pub const NORTH_EDGE_ONLY: &str = "20,,,";
}

/// Diapost `fcst_track` file: start 2005080100, hours 0 to 18, with hour 12
/// flagged.
pub mod diapost {
    pub const START: &str = "2005080100";

    pub const TRACK: &str = "\
2005080100 0 0 0 -40.0 16.0 1000 45
2005080100 6 0 0 -41.2 17.1 992 78
2005080100 12 0 1 -42.0 17.5 990 80
2005080100 18 0 0 -43.1 18.2 985 85
";

    /// Observations kept with the default options (the flagged one dropped).
    pub const UNFLAGGED_COUNT: usize = 3;
}

/// GFDL tracker `fort.69` output for 09L from 2012082600.
///
/// Hour 0 appears twice (34 and 50 kt radii), hour 12 has no fix, and hour
/// 18 has a different position in its second radii record.
pub mod gfdl {
    pub const START: &str = "2012082600";

    pub const FORT69: &str = "\
AL, 09, 2012082600, 03, HWRF, 00000, 230N, 780W, 55, 995, XX, 34, NEQ, 120, 150, 60, 60, 1009, 250, 30
AL, 09, 2012082600, 03, HWRF, 00000, 230N, 780W, 55, 995, XX, 50, NEQ, 60, 70, 30, 30, 1009, 250, 30
AL, 09, 2012082600, 03, HWRF, 00600, 236N, 792W, 60, 990, XX, 34, NEQ, 130, 150, 60, 70, 1009, 250, 30
AL, 09, 2012082600, 03, HWRF, 01200, 0, 0, 0, 0, XX, 34, NEQ, 0, 0, 0, 0, 0, 0, 0
AL, 09, 2012082600, 03, HWRF, 01800, 248N, 815W, 65, 985, XX, 34, NEQ, 140, 160, 70, 80, 1008, 260, 25
AL, 09, 2012082600, 03, HWRF, 01800, 250N, 820W, 65, 985, XX, 50, NEQ, 70, 80, 40, 40, 1008, 260, 25
";

    /// Distinct forecast hours in [`FORT69`].
    pub const HOURS: [i64; 4] = [0, 6, 12, 18];

    /// Hour written with a latitude of `0`.
    pub const NO_FIX_HOUR: i64 = 12;

    /// Hour 6 has no fix in its first record and a position in its second.
    pub const NO_FIX_THEN_FIX: &str = "\
AL, 09, 2012082600, 03, HWRF, 00000, 230N, 780W, 55, 995, XX, 34, NEQ, 120, 150, 60, 60, 1009, 250, 30
AL, 09, 2012082600, 03, HWRF, 00600, 0, 0, 0, 0, XX, 34, NEQ, 0, 0, 0, 0, 0, 0, 0
AL, 09, 2012082600, 03, HWRF, 00600, 236N, 792W, 60, 990, XX, 50, NEQ, 60, 70, 30, 30, 1009, 250, 30
";
}

/// Nolan hnr1 track: reference time 2005-08-01 00:00:00, pressure in Pa.
pub mod nolan {
    pub const START: &str = "20050801000000";

    pub const TRACK: &str = "\
20050801000000 1 0 0 15.0 -40.0 100200 40.0 0 0 0 0 0
20050801060000 2 0 0 15.6 -41.0 99850 45.5 0 0 0 0 0
20050801120000 3 0 0 16.1 -42.2 99500 50.0 0 0 0 0 0
";
}

/// GEOS-5 nature-run track, longitudes in degrees east.
pub mod geos5 {
    pub const TRACK: &str = "\
2006/09/12 03:30 ; 34.5000 ; 273.750 ; 0 ; 1001.50 ; 75.3543 ; 32.8331 ; 40.5677
2006/09/12 09:30 ; 34.9000 ; 273.250 ; 0 ; 999.00 ; 77.1000 ; 34.0000 ; 41.2000
2006/09/12 15:30 ; 35.4000 ; 272.500 ; 0 ; 996.25 ; 80.0000 ; 36.5000 ; 43.0000
";
}

/// NHC b-deck for Isaac (09L, 2012).
///
/// 2012082518 is before the experiment start; 2012082600 is written twice
/// (34 and 50 kt radii).
pub mod bdeck {
    pub const STORM_ID: &str = "09L";
    pub const START: &str = "2012082600";
    pub const FILE_NAME: &str = "bal092012.dat.gz";

    pub const TRACK: &str = "\
AL, 09, 2012082518,   , BEST,   0, 225N,  770W,  50, 1000, TS,  34, NEQ,  120,  150,   60,   60, 1009,  250,  30,  60,   0,   L,   0,    ,  300,  12,      ISAAC, D,
AL, 09, 2012082600,   , BEST,   0, 230N,  780W,  55,  995, TS,  34, NEQ,  120,  150,   60,   60, 1009,  250,  30,  65,   0,   L,   0,    ,  300,  12,      ISAAC, D,
AL, 09, 2012082600,   , BEST,   0, 230N,  780W,  55,  995, TS,  50, NEQ,   60,   70,   30,   30, 1009,  250,  30,  65,   0,   L,   0,    ,  300,  12,      ISAAC, D,
AL, 09, 2012082606,   , BEST,   0, 238N,  795W,  55,  992, TS,  34, NEQ,  120,  150,   60,   60, 1009,  250,  30,  65,   0,   L,   0,    ,  300,  12,      ISAAC, D,
AL, 09, 2012082612,   , BEST,   0, 245N,  810W,  60,  990, TS,  34, NEQ,  130,  160,   60,   70, 1009,  250,  25,  70,   0,   L,   0,    ,  295,  13,      ISAAC, D,
";

    /// Forecast hours kept relative to [`START`].
    pub const HOURS: [i64; 3] = [0, 6, 12];
}

/// SYNDAT / TC vitals records for two storms.
pub mod tcvitals {
    pub const STORM_ID: &str = "09L";
    pub const START: &str = "2012082600";

    pub const RECORDS: &str = "\
NHC  09L ISAAC     20120825 1800 225N 0770W 300 050 1000 1009 0250 26 -99 0120 0150 0060 0060 D
NHC  09L ISAAC     20120826 0000 230N 0780W 300 050 0995 1009 0250 28 -99 0120 0150 0060 0060 D
NHC  12E ILEANA    20120826 0000 180N 1080W 290 040 0998 1008 0200 23 -99 0080 0080 0040 0060 M
NHC  09L ISAAC     20120826 0000 230N 0780W 300 050 0995 1009 0250 28 -99 0120 0150 0060 0060 D
NHC  09L ISAAC     20120826 0600 238N 0795W 300 060 0992 1009 0250 28 -99 0120 0150 0060 0060 D
";

    /// Forecast hours kept for 09L relative to [`START`].
    pub const HOURS: [i64; 2] = [0, 6];
}
