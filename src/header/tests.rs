// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ffi::CString;

use fitsio::FitsFile;

use super::*;
use crate::units::AngleUnit;

fn aips_header() -> FitsHeader {
    let mut hdr = FitsHeader::new();
    hdr.insert("SIMPLE", true);
    hdr.insert("NAXIS", 2_i64);
    hdr.push_history("AIPS   CLEAN BMAJ=  1.7599E-03 BMIN=  1.5740E-03 BPA=   2.61");
    hdr
}

#[test]
fn keyword_mode() {
    let mut hdr = FitsHeader::new();
    hdr.insert("BMAJ", 0.1);
    hdr.insert("BMIN", 0.05);
    hdr.insert("BPA", 30.0);
    let beam = Beam::from_fits_header(&hdr).unwrap();
    assert_eq!(beam, Beam::from_degrees(0.1, 0.05, 30.0));
}

#[test]
fn keyword_mode_defaults() {
    // Without BMIN the beam is circular; without BPA the angle is 0.
    let mut hdr = FitsHeader::new();
    hdr.insert("BMAJ", 0.1);
    let beam = Beam::from_fits_header(&hdr).unwrap();
    assert_eq!(beam, Beam::from_degrees(0.1, 0.1, 0.0));
}

#[test]
fn keywords_are_case_insensitive() {
    let mut hdr = FitsHeader::new();
    hdr.insert("bmaj", 0.2);
    assert!(hdr.contains("BMAJ"));
    assert_eq!(hdr.get_f64("Bmaj"), Some(0.2));
    let beam = Beam::from_fits_header(&hdr).unwrap();
    assert_eq!(beam.major, 0.2);
}

#[test]
fn integer_values_are_usable_as_floats() {
    let mut hdr = FitsHeader::new();
    hdr.insert("BMAJ", 1_i64);
    let beam = Beam::from_fits_header(&hdr).unwrap();
    assert_eq!(beam.major, 1.0);
}

#[test]
fn aips_history_fallback() {
    let beam = Beam::from_fits_header(&aips_header()).unwrap();
    assert_eq!(beam, Beam::from_degrees(1.7599e-3, 1.5740e-3, 2.61));
}

#[test]
fn last_aips_record_wins() {
    // The most recent CLEAN entry is the one that applies.
    let mut hdr = aips_header();
    hdr.push_history("Some unrelated history record");
    hdr.push_history("AIPS   CLEAN BMAJ=  2.0000E-03 BMIN=  1.0000E-03 BPA=  -5.00");
    let beam = Beam::from_fits_header(&hdr).unwrap();
    assert_eq!(beam, Beam::from_degrees(2.0e-3, 1.0e-3, -5.0));
}

#[test]
fn history_without_bmaj_is_not_enough() {
    let mut hdr = FitsHeader::new();
    hdr.push_history("AIPS   CLEAN niter=  1000");
    let result = Beam::from_fits_header(&hdr);
    assert!(matches!(result, Err(HeaderError::NoBeamInfo)));
}

#[test]
fn no_beam_info_at_all() {
    let hdr = FitsHeader::new();
    let result = Beam::from_fits_header(&hdr);
    assert!(matches!(result, Err(HeaderError::NoBeamInfo)));
}

#[test]
fn mangled_aips_record() {
    let mut hdr = FitsHeader::new();
    hdr.push_history("BMAJ is mentioned but this is not a CLEAN record");
    let result = Beam::from_fits_header(&hdr);
    assert!(matches!(result, Err(HeaderError::UnparsableAipsLine(_))));
}

#[test]
fn header_round_trip() {
    let beam = Beam::from_degrees(1.7599e-3, 1.5740e-3, 2.61);
    let mut hdr = FitsHeader::new();
    beam.attach_to_header(&mut hdr);
    assert_eq!(hdr.get_f64("BMAJ"), Some(1.7599e-3));
    assert_eq!(hdr.get_f64("BMIN"), Some(1.5740e-3));
    assert_eq!(hdr.get_f64("BPA"), Some(2.61));

    let recovered = Beam::from_fits_header(&hdr).unwrap();
    assert_eq!(recovered, beam);
}

#[test]
fn attach_updates_existing_keywords() {
    let mut hdr = FitsHeader::new();
    hdr.insert("BMAJ", 99.0);
    Beam::from_degrees(0.1, 0.1, 0.0).attach_to_header(&mut hdr);
    assert_eq!(hdr.get_f64("BMAJ"), Some(0.1));
}

#[test]
fn cards_keep_insertion_order() {
    let mut hdr = FitsHeader::new();
    hdr.insert("SIMPLE", true);
    hdr.insert("BMAJ", 0.1);
    hdr.insert("BMIN", 0.05);
    let keys: Vec<&str> = hdr.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["SIMPLE", "BMAJ", "BMIN"]);
}

#[test]
fn unrecognised_extension() {
    let result = Beam::from_fits_file("header.txt");
    assert!(matches!(
        result,
        Err(HeaderError::UnrecognisedExtension(_))
    ));
}

#[test]
fn missing_file_is_a_fits_error() {
    let result = Beam::from_fits_file("definitely_not_here.fits");
    assert!(matches!(result, Err(HeaderError::Fits(FitsError::Open { .. }))));
}

#[test]
fn beam_from_fits_file_keywords() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("beam.fits");
    {
        let mut fptr = FitsFile::create(&path).open().unwrap();
        let hdu = fptr.primary_hdu().unwrap();
        hdu.write_key(&mut fptr, "BMAJ", 0.1_f64).unwrap();
        hdu.write_key(&mut fptr, "BMIN", 0.05_f64).unwrap();
        hdu.write_key(&mut fptr, "BPA", 30.0_f64).unwrap();
    }

    let beam = Beam::from_fits_file(&path).unwrap();
    assert_eq!(beam, Beam::from_degrees(0.1, 0.05, 30.0));
}

#[test]
fn beam_from_fits_file_aips_history() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("aips.fits");
    {
        let mut fptr = FitsFile::create(&path).open().unwrap();
        // fitsio doesn't expose HISTORY writing; go through cfitsio.
        let record =
            CString::new("AIPS   CLEAN BMAJ=  1.7599E-03 BMIN=  1.5740E-03 BPA=   2.61").unwrap();
        let mut status = 0;
        unsafe {
            // ffphis = fits_write_history
            fitsio_sys::ffphis(
                fptr.as_raw(),   /* I - FITS file pointer     */
                record.as_ptr(), /* I - history string        */
                &mut status,     /* IO - error status         */
            );
        }
        assert_eq!(status, 0);
    }

    let beam = Beam::from_fits_file(&path).unwrap();
    assert_eq!(beam, Beam::from_degrees(1.7599e-3, 1.5740e-3, 2.61));
}

#[test]
fn fits_file_extension_check_ignores_case() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("SHOUTY.FITS");
    {
        let mut fptr = FitsFile::create(&path).open().unwrap();
        let hdu = fptr.primary_hdu().unwrap();
        hdu.write_key(&mut fptr, "BMAJ", 0.2_f64).unwrap();
    }

    let beam = Beam::from_fits_file(&path).unwrap();
    assert_eq!(beam.major, 0.2);
    assert_eq!(beam.display_unit, AngleUnit::Arcsec);
}
