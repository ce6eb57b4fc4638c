use super::*;

#[test]
fn layout_mode_parses_case_insensitively() {
    assert_eq!("fill".parse::<LayoutMode>().unwrap(), LayoutMode::Fill);
    assert_eq!(" Fit ".parse::<LayoutMode>().unwrap(), LayoutMode::Fit);
    assert_eq!("STRETCH".parse::<LayoutMode>().unwrap(), LayoutMode::Stretch);
    assert_eq!("center".parse::<LayoutMode>().unwrap(), LayoutMode::Center);
}

#[test]
fn unknown_layout_mode_is_rejected() {
    let err = "zoom".parse::<LayoutMode>().unwrap_err();
    assert!(matches!(err, WallfitError::UnknownLayoutMode(_)));
    assert!("".parse::<LayoutMode>().is_err());
}

#[test]
fn target_parses_and_rejects_unknown() {
    assert_eq!("home".parse::<TargetSurface>().unwrap(), TargetSurface::Home);
    assert_eq!("Lock".parse::<TargetSurface>().unwrap(), TargetSurface::Lock);
    assert_eq!("both".parse::<TargetSurface>().unwrap(), TargetSurface::Both);
    let err = "system".parse::<TargetSurface>().unwrap_err();
    assert!(matches!(err, WallfitError::UnknownTarget(_)));
}

#[test]
fn display_matches_parse_names() {
    for m in LayoutMode::ALL {
        assert_eq!(m.to_string().parse::<LayoutMode>().unwrap(), m);
    }
    for t in TargetSurface::ALL {
        assert_eq!(t.to_string().parse::<TargetSurface>().unwrap(), t);
    }
}

#[test]
fn from_raw_checks_length() {
    assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
    let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, WallfitError::InvalidGeometry(_)));
}

#[test]
fn transparent_buffer_is_zeroed() {
    let buf = PixelBuffer::transparent(3, 2).unwrap();
    assert_eq!(buf.as_raw().len(), 24);
    assert!(buf.as_raw().iter().all(|&b| b == 0));
    assert_eq!(buf.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(buf.pixel(3, 0), None);
}

#[test]
fn canvas_rejects_zero() {
    assert!(Canvas::new(0, 10).is_err());
    assert_eq!(Canvas::new(4, 5).unwrap(), Canvas { width: 4, height: 5 });
}
