//! Small conveniences for binaries built on this crate.

/// Create a [`Complex64`][num_complex::Complex64] from real and/or imaginary
/// parts.
///
/// ```
/// # use bose_hubbard::c;
/// use bose_hubbard::utils::C64;
/// assert_eq!(c!(1.5), C64::new(1.5, 0.0));
/// assert_eq!(c!(i 2.0), C64::new(0.0, 2.0));
/// assert_eq!(c!(1.0, 2.0), C64::new(1.0, 2.0));
/// ```
#[macro_export]
macro_rules! c {
    ( i $im:expr ) => {
        $crate::utils::C64::new(0.0, $im)
    };
    ( $re:expr, $im:expr ) => {
        $crate::utils::C64::new($re, $im)
    };
    ( $re:expr ) => {
        $crate::utils::C64::new($re, 0.0)
    };
}

#[doc(hidden)]
pub use num_complex::Complex64 as C64;

/// Create a directory and all its parents if it does not already exist,
/// propagating any I/O error with `?`.
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        {
            let _dir_: &::std::path::Path = ::std::convert::AsRef::as_ref(&$dir);
            if !_dir_.is_dir() {
                ::std::fs::create_dir_all(_dir_)?;
            }
        }
    }
}

/// Write a collection of arrays to a `.npz` file, propagating any error with
/// `?`.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "rows" => &rows,
///         "values" => &values,
///     }
/// );
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $filename:expr,
        arrays: { $( $name:expr => $array:expr ),* $(,)? } $(,)?
    ) => {
        {
            let mut _npz_
                = $crate::ndarray_npy::NpzWriter::new(
                    ::std::fs::File::create($filename)?
                );
            $(
                _npz_.add_array($name, $array)?;
            )*
            _npz_.finish()?;
        }
    }
}
