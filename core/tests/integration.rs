//! Every service operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `AvatarService` over
//! real HTTP using `UreqTransport`. Validates that request building,
//! response parsing and persistence work end to end with the actual server.

use std::fs;
use std::io::Cursor;
use std::net::SocketAddr;

use avatar_core::{
    ApiError, AvatarClient, AvatarRequestParams, AvatarResult, AvatarService, DirectorySink, Gender,
    ImageFormat, UreqTransport,
};

fn start_mock_server() -> SocketAddr {
    mock_server::spawn_local().unwrap()
}

fn service(addr: SocketAddr, out: &std::path::Path) -> AvatarService<UreqTransport, DirectorySink> {
    AvatarService::new(
        AvatarClient::new(&format!("http://{addr}/")),
        UreqTransport::new(),
        DirectorySink::new(out),
    )
}

#[test]
fn demonstration_sequence() {
    let addr = start_mock_server();
    let out = tempfile::tempdir().unwrap();
    let svc = service(addr, out.path());

    // Step 1: health check.
    let status = svc.health().unwrap().success().unwrap();
    assert_eq!(status.status, "success");

    // Step 2: generate a 300px male avatar.
    let params = AvatarRequestParams {
        size: 300,
        gender: Gender::Male,
        ..Default::default()
    };
    let avatar = svc.generate(&params).unwrap().success().unwrap();
    assert_eq!(avatar.size, 300);
    assert_eq!(avatar.gender, Gender::Male);
    assert_eq!(avatar.svg, mock_server::render_svg(300, "1"));

    // Step 3: save a named SVG.
    let params = AvatarRequestParams {
        gender: Gender::Female,
        filename: Some("female_avatar".to_string()),
        ..Default::default()
    };
    let outcome = svc.save_single(&params).unwrap();
    let path = outcome.path().unwrap();
    assert_eq!(path, out.path().join("female_avatar.svg"));
    assert_eq!(fs::read_to_string(path).unwrap(), mock_server::render_svg(280, "2"));

    // Step 4: save a named PNG.
    let params = AvatarRequestParams {
        size: 400,
        format: ImageFormat::Png,
        filename: Some("random_avatar".to_string()),
        ..Default::default()
    };
    let outcome = svc.save_single(&params).unwrap();
    let path = outcome.path().unwrap();
    assert_eq!(path.extension().unwrap(), "png");
    assert_eq!(&fs::read(path).unwrap()[..4], b"\x89PNG");

    // Step 5: batch of three SVGs.
    let params = AvatarRequestParams {
        amount: 3,
        size: 200,
        gender: Gender::Male,
        ..Default::default()
    };
    let outcome = svc.save_batch(&params).unwrap();
    let path = outcome.path().unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("avatars_svg_") && name.ends_with(".zip"));
    let archive = zip::ZipArchive::new(Cursor::new(fs::read(path).unwrap())).unwrap();
    assert_eq!(archive.len(), 3);

    // Step 6: metadata query.
    let params = AvatarRequestParams {
        size: 250,
        ..Default::default()
    };
    let meta = svc.fetch_metadata(&params).unwrap().success().unwrap();
    assert_eq!(meta.size, 250);
    assert_eq!(meta.gender, Gender::Random);
}

#[test]
fn default_filenames_do_not_collide() {
    let addr = start_mock_server();
    let out = tempfile::tempdir().unwrap();
    let svc = service(addr, out.path());

    let first = svc.save_single(&AvatarRequestParams::default()).unwrap();
    let second = svc.save_single(&AvatarRequestParams::default()).unwrap();
    assert_ne!(first.path().unwrap(), second.path().unwrap());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 2);
}

#[test]
fn generate_is_idempotent_against_the_stub() {
    let addr = start_mock_server();
    let out = tempfile::tempdir().unwrap();
    let svc = service(addr, out.path());

    let params = AvatarRequestParams {
        size: 128,
        gender: Gender::Female,
        ..Default::default()
    };
    let first = svc.generate(&params).unwrap();
    let second = svc.generate(&params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concurrent_calls_are_independent() {
    let addr = start_mock_server();
    let out = tempfile::tempdir().unwrap();
    let svc = service(addr, out.path());

    let sizes = [64u32, 128, 256, 512];
    let results: Vec<AvatarResult<_>> = std::thread::scope(|scope| {
        let handles: Vec<_> = sizes
            .iter()
            .map(|&size| {
                let svc = &svc;
                scope.spawn(move || {
                    let params = AvatarRequestParams {
                        size,
                        ..Default::default()
                    };
                    svc.generate(&params).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (size, result) in sizes.iter().zip(results) {
        let avatar = result.success().unwrap();
        assert_eq!(avatar.size, *size);
        assert_eq!(avatar.svg, mock_server::render_svg(*size, "0"));
    }
}

#[test]
fn unreachable_service_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let out = tempfile::tempdir().unwrap();
    let svc = service(addr, out.path());

    let err = svc.generate(&AvatarRequestParams::default()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn filename_outside_the_output_directory_is_refused() {
    let addr = start_mock_server();
    let root = tempfile::tempdir().unwrap();
    let out = root.path().join("out");
    fs::create_dir(&out).unwrap();
    let svc = service(addr, &out);

    let params = AvatarRequestParams {
        filename: Some("../escaped".to_string()),
        ..Default::default()
    };
    let err = svc.save_single(&params).unwrap_err();
    assert!(matches!(err, ApiError::InvalidFilename(_)));
    assert!(!root.path().join("escaped.svg").exists());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

