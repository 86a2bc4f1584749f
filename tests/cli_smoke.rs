use std::path::PathBuf;

fn cardgen_exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_cardgen")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "cardgen.exe"
            } else {
                "cardgen"
            });
            p
        })
}

fn font_available() -> bool {
    if cardgen::text::resolve_font_path(None).is_ok() {
        return true;
    }
    eprintln!("skipping: no system font found");
    false
}

#[test]
fn cli_renders_a_white_card() {
    if !font_available() {
        return;
    }

    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    let out_arg = out_path.to_string_lossy().to_string();
    let status = std::process::Command::new(cardgen_exe())
        .args([
            "-c",
            "white",
            "--head1",
            "Top text",
            "--head2",
            "Middle text",
            "-s",
            "5/7",
            "-o",
            out_arg.as_str(),
        ])
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
    assert_eq!(
        image::image_dimensions(&out_path).unwrap(),
        (cardgen::card::CARD_WIDTH, cardgen::card::CARD_HEIGHT)
    );
}

#[test]
fn cli_rejects_unknown_colors() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let out_path = dir.join("never.png");
    let _ = std::fs::remove_file(&out_path);

    let out_arg = out_path.to_string_lossy().to_string();
    let output = std::process::Command::new(cardgen_exe())
        .args(["-c", "chartreuse", "-o", out_arg.as_str()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!out_path.exists());
}
