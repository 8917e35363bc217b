// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading the primary header of a FITS file into a [`FitsHeader`].
//!
//! Only the cards are read; any image data stays on disk.

use std::ffi::CStr;
use std::path::Path;

use fitsio::{errors::check_status as fits_check_status, FitsFile};
use log::trace;
use thiserror::Error;

use super::{CardValue, FitsHeader};

/// Errors associated with reading a FITS header from disk.
#[derive(Error, Debug)]
pub enum FitsError {
    /// Error when opening a fits file.
    #[error("Couldn't open {fits_filename}: {fits_error}")]
    Open {
        fits_error: Box<fitsio::errors::Error>,
        fits_filename: Box<Path>,
    },

    /// A generic error associated with cfitsio.
    #[error("{fits_filename}: cfitsio error while reading header records: {fits_error}")]
    Fitsio {
        fits_error: Box<fitsio::errors::Error>,
        fits_filename: Box<Path>,
    },
}

impl FitsHeader {
    /// Read all cards of a FITS file's primary HDU.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FitsHeader, FitsError> {
        fn inner(path: &Path) -> Result<FitsHeader, FitsError> {
            let mut fptr = FitsFile::open(path).map_err(|e| FitsError::Open {
                fits_error: Box::new(e),
                fits_filename: path.to_path_buf().into_boxed_path(),
            })?;
            let cfitsio_err = |e: fitsio::errors::Error| FitsError::Fitsio {
                fits_error: Box::new(e),
                fits_filename: path.to_path_buf().into_boxed_path(),
            };

            // How many keywords does the primary HDU hold?
            let mut num_keys: std::os::raw::c_int = 0;
            let mut status = 0;
            unsafe {
                // ffghsp = fits_get_hdrspace
                fitsio_sys::ffghsp(
                    fptr.as_raw(),        /* I - FITS file pointer                    */
                    &mut num_keys,        /* O - number of existing keywords          */
                    std::ptr::null_mut(), /* O - remaining unused header space        */
                    &mut status,          /* IO - error status                        */
                );
            }
            fits_check_status(status).map_err(cfitsio_err)?;

            let mut hdr = FitsHeader::new();
            let mut card: [std::os::raw::c_char; 81] = [0; 81];
            for i in 1..=num_keys {
                unsafe {
                    // ffgrec = fits_read_record
                    fitsio_sys::ffgrec(
                        fptr.as_raw(),     /* I - FITS file pointer                 */
                        i,                 /* I - number of the keyword to read     */
                        card.as_mut_ptr(), /* O - the 80-character keyword card     */
                        &mut status,       /* IO - error status                     */
                    );
                }
                fits_check_status(status).map_err(cfitsio_err)?;
                let card = unsafe { CStr::from_ptr(card.as_ptr()) };
                parse_card(&mut hdr, &card.to_string_lossy());
            }

            trace!("Read {} header records from {}", num_keys, path.display());
            Ok(hdr)
        }
        inner(path.as_ref())
    }
}

/// Digest one 80-character header card into the mapping. Commentary keywords
/// other than HISTORY are ignored.
fn parse_card(hdr: &mut FitsHeader, card: &str) {
    // Cards are 80 ASCII characters; anything else is malformed.
    if card.len() < 8 || !card.is_ascii() {
        return;
    }
    let (keyword, rest) = card.split_at(8);
    let keyword = keyword.trim_end();
    match keyword {
        // HISTORY text occupies columns 9-80.
        "HISTORY" => hdr.push_history(rest.trim_end()),
        "COMMENT" | "CONTINUE" | "END" | "" => (),
        _ => {
            // Value cards have "= " in columns 9-10.
            if let Some(value_str) = rest.strip_prefix("= ") {
                hdr.insert(keyword, parse_value(value_str));
            }
        }
    }
}

/// Parse a card's value field, stripping any inline comment.
fn parse_value(s: &str) -> CardValue {
    let s = s.trim();
    if let Some(stripped) = s.strip_prefix('\'') {
        // A string value ends at the next single quote; trailing blanks are
        // not significant.
        let end = stripped.find('\'').unwrap_or(stripped.len());
        return CardValue::Str(stripped[..end].trim_end().to_string());
    }

    let bare = match s.find('/') {
        Some(i) => s[..i].trim(),
        None => s,
    };
    match bare {
        "T" => CardValue::Bool(true),
        "F" => CardValue::Bool(false),
        _ => {
            if let Ok(int) = bare.parse::<i64>() {
                CardValue::Int(int)
            } else if let Ok(float) = bare.parse::<f64>() {
                CardValue::Float(float)
            } else {
                CardValue::Str(bare.to_string())
            }
        }
    }
}
