use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use foundation::math::{Equirectangular, GeoCoord, Orthographic, Projection};
use formats::{ProjectionKind, ViewPreset, parse_lat, parse_lon, parse_sight_document};
use layers::LopKind;
use render::{BaseSampler, MapSampler, SolidSampler, Viewport};
use scene::ViewController;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Flat deep-water background used when no base map is given.
const DEFAULT_BASE: layers::Rgba = layers::Rgba::opaque(11, 36, 64);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "render" => cmd_render(args),
        "probe" => cmd_probe(args),
        _ => Err(usage()),
    }
}

fn cmd_render(args: Vec<String>) -> Result<(), String> {
    // pelorus render <sights.txt> <out.png> [--projection NAME] [--width N]
    //     [--map IMAGE] [--center LAT,LON] [--zoom Z] [--preset view.json]
    if args.len() < 2 {
        return Err(usage());
    }

    let sights_path = PathBuf::from(&args[0]);
    let out_path = PathBuf::from(&args[1]);

    let mut projection_flag: Option<ProjectionKind> = None;
    let mut width_flag: Option<u32> = None;
    let mut map_flag: Option<String> = None;
    let mut center_flag: Option<[f64; 2]> = None;
    let mut zoom_flag: Option<f64> = None;
    let mut preset_path: Option<PathBuf> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--projection" => {
                i += 1;
                if i >= args.len() {
                    return Err("--projection requires a value".to_string());
                }
                projection_flag = Some(parse_projection(&args[i])?);
            }
            "--width" => {
                i += 1;
                if i >= args.len() {
                    return Err("--width requires a value".to_string());
                }
                width_flag = Some(
                    args[i]
                        .parse::<u32>()
                        .map_err(|_| "--width must be an integer".to_string())?,
                );
            }
            "--map" => {
                i += 1;
                if i >= args.len() {
                    return Err("--map requires a path".to_string());
                }
                map_flag = Some(args[i].clone());
            }
            "--center" => {
                i += 1;
                if i >= args.len() {
                    return Err("--center requires LAT,LON".to_string());
                }
                center_flag = Some(parse_center(&args[i])?);
            }
            "--zoom" => {
                i += 1;
                if i >= args.len() {
                    return Err("--zoom requires a value".to_string());
                }
                zoom_flag = Some(
                    args[i]
                        .parse::<f64>()
                        .map_err(|_| "--zoom must be a number".to_string())?,
                );
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    return Err("--preset requires a path".to_string());
                }
                preset_path = Some(PathBuf::from(&args[i]));
            }
            other => {
                return Err(format!("unknown arg: {other}\n\n{}", usage()));
            }
        }
        i += 1;
    }

    let mut preset = match preset_path {
        Some(p) => {
            let raw = fs::read_to_string(&p).map_err(|e| format!("read {p:?}: {e}"))?;
            serde_json::from_str::<ViewPreset>(&raw)
                .map_err(|e| format!("parse preset {p:?}: {e}"))?
        }
        None => ViewPreset::default(),
    };

    // Explicit flags win over the preset.
    if let Some(kind) = projection_flag {
        preset.projection = kind;
    }
    if let Some(width) = width_flag {
        preset.width = width;
    }
    if let Some(map) = map_flag {
        preset.map = Some(map);
    }
    if let Some(center) = center_flag {
        preset.center = Some(center);
    }
    if let Some(zoom) = zoom_flag {
        preset.zoom = Some(zoom);
    }

    let text = fs::read_to_string(&sights_path).map_err(|e| format!("read {sights_path:?}: {e}"))?;
    let sheet = parse_sight_document(&text).map_err(|e| format!("parse {sights_path:?}: {e}"))?;

    let projection: &dyn Projection = match preset.projection {
        ProjectionKind::Equirectangular => &Equirectangular,
        ProjectionKind::Orthographic => &Orthographic,
    };

    let mut viewport = Viewport::new(preset.width, projection.ratio());
    if let Some(zoom) = preset.zoom {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(format!("zoom must be a positive number, got {zoom}"));
        }
        viewport.zoom_by(1.0 / zoom, viewport.width / 2, viewport.height / 2);
    }

    let mut view = ViewController::new();
    if let Some([lat_deg, lon_deg]) = preset.center {
        if !(-90.0..=90.0).contains(&lat_deg) {
            return Err(format!("center latitude must sit within +/-90, got {lat_deg}"));
        }
        if !lon_deg.is_finite() {
            return Err(format!("center longitude must be finite, got {lon_deg}"));
        }
        view.look_at(GeoCoord::from_degrees(lat_deg, lon_deg));
    }

    let base: Box<dyn BaseSampler> = match &preset.map {
        Some(map) => {
            let path = PathBuf::from(map);
            Box::new(MapSampler::open(&path).map_err(|e| format!("open map {path:?}: {e}"))?)
        }
        None => Box::new(SolidSampler(DEFAULT_BASE)),
    };

    let started = Instant::now();
    let frame = render::render(&viewport, projection, view.world(), &sheet, base.as_ref());
    info!(
        width = viewport.width,
        height = viewport.height,
        lops = sheet.lops.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "render pass finished"
    );

    frame
        .into_rgba_image()
        .save(&out_path)
        .map_err(|e| format!("write {out_path:?}: {e}"))?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_probe(args: Vec<String>) -> Result<(), String> {
    // pelorus probe <sights.txt> <lat> <lon>
    if args.len() != 3 {
        return Err(usage());
    }

    let sights_path = PathBuf::from(&args[0]);
    let lat_deg = parse_lat(&args[1]).map_err(|e| format!("lat: {e}"))?;
    let lon_deg = parse_lon(&args[2]).map_err(|e| format!("lon: {e}"))?;

    let text = fs::read_to_string(&sights_path).map_err(|e| format!("read {sights_path:?}: {e}"))?;
    let sheet = parse_sight_document(&text).map_err(|e| format!("parse {sights_path:?}: {e}"))?;

    let coord = GeoCoord::from_degrees(lat_deg, lon_deg);
    for (index, lop) in sheet.lops.iter().enumerate() {
        let err = compute::lop_error(coord, lop).to_degrees();
        let kind = match lop.kind {
            LopKind::Range { .. } => "range",
            LopKind::Azimuth { .. } => "azimuth",
        };
        println!("lop {index} ({kind}): err {err:.4} deg");
    }
    match compute::rms_error(coord, &sheet.lops) {
        Some(rms) => println!("rms: {:.4} deg", rms.to_degrees()),
        None => println!("rms: n/a (no lines of position)"),
    }
    Ok(())
}

fn parse_projection(raw: &str) -> Result<ProjectionKind, String> {
    match raw {
        "equirectangular" => Ok(ProjectionKind::Equirectangular),
        "orthographic" => Ok(ProjectionKind::Orthographic),
        other => Err(format!("unknown projection: {other}")),
    }
}

fn parse_center(raw: &str) -> Result<[f64; 2], String> {
    let Some((lat_raw, lon_raw)) = raw.split_once(',') else {
        return Err(format!("--center wants LAT,LON, got: {raw}"));
    };
    let lat = parse_lat(lat_raw.trim()).map_err(|e| format!("center lat: {e}"))?;
    let lon = parse_lon(lon_raw.trim()).map_err(|e| format!("center lon: {e}"))?;
    Ok([lat, lon])
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "pelorus".to_string());
    format!(
        "Usage:\n  {exe} render <sights.txt> <out.png> [--projection equirectangular|orthographic] [--width N] [--map IMAGE] [--center LAT,LON] [--zoom Z] [--preset view.json]\n  {exe} probe <sights.txt> <lat> <lon>\n\nNotes:\n- A sight document holds one record per line: `lat`/`lon` plus `rad` (range circle) or `azm` (bearing line), with `dif` tolerance and `color`; a `min-err` line sets the best-fit highlight.\n- Angles on the command line accept the document's degree grammar (decimal or DMS, hemisphere letters).\n- --zoom magnifies around the view center (2 doubles the scale); --map expects an equirectangular image.\n"
    )
}
