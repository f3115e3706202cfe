//! This example encodes a single raw video frame with the utvideo
//! crate and writes extradata followed by the compressed packet to an
//! output file.

// utvideo crate
extern crate utvideo;

// CLI crates
extern crate clap;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use clap::{App, Arg};

use utvideo::encoder::{Encoder, EncoderConfig};
use utvideo::picture::{PixelFormat, Picture};

fn parse_pixel_format(s: &str) -> Result<PixelFormat, String> {
    match s {
        "rgb24" => Ok(PixelFormat::Rgb24),
        "rgba" => Ok(PixelFormat::Rgba),
        "yuv420p" => Ok(PixelFormat::Yuv420p),
        "yuv422p" => Ok(PixelFormat::Yuv422p),
        other => Err(format!("unknown pixel format '{}'", other)),
    }
}

// Splits a packed RGB/RGBA buffer into the single plane `Picture`
// expects, or a planar YUV buffer into its three Y/U/V planes.
fn planes_of(
    buf: &mut [u8],
    format: PixelFormat,
    width: u32,
    height: u32,
) -> (Vec<&mut [u8]>, Vec<usize>) {
    if format.is_packed_rgb() {
        let step = format.plane_count();
        let stride = width as usize * step;
        (vec![buf], vec![stride])
    } else {
        let (cw, ch) = format.chroma_dimensions(width as usize, height as usize);
        let luma_len = width as usize * height as usize;
        let chroma_len = cw * ch;
        let (y, rest) = buf.split_at_mut(luma_len);
        let (u, v) = rest.split_at_mut(chroma_len);
        (vec![y, u, &mut v[..chroma_len]], vec![width as usize, cw, cw])
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let matches = App::new("utvideo-encode")
        .about("Encodes a single raw video frame with the utvideo codec")
        .arg(
            Arg::new("input-path")
                .help("Raw planar/packed frame to encode")
                .short('i')
                .long("input")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("output-path")
                .help("Output file for extradata + compressed packet")
                .short('o')
                .long("output")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("rgb24, rgba, yuv420p, or yuv422p")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("predictor")
                .long("predictor")
                .help("0=left, 2=median, 4=none")
                .takes_value(true)
                .default_value("2"),
        )
        .get_matches();

    let input_path = matches.value_of("input-path").map(Path::new).unwrap();
    let output_path = matches.value_of("output-path").map(Path::new).unwrap();
    let width: u32 = matches.value_of("width").unwrap().parse().unwrap();
    let height: u32 = matches.value_of("height").unwrap().parse().unwrap();
    let prediction_method: i32 =
        matches.value_of("predictor").unwrap().parse().unwrap();
    let pixel_format =
        parse_pixel_format(matches.value_of("format").unwrap()).unwrap_or_else(
            |e| {
                eprintln!("{}", e);
                std::process::exit(1);
            },
        );

    log::info!("reading {:?}", input_path);
    let mut buf = Vec::new();
    File::open(input_path)?.read_to_end(&mut buf)?;

    log::debug!(
        "initializing encoder: {:?} {}x{} predictor={}",
        pixel_format,
        width,
        height,
        prediction_method
    );
    let mut encoder = Encoder::init(EncoderConfig {
        pixel_format,
        width,
        height,
        prediction_method,
    })
    .unwrap_or_else(|e| {
        eprintln!("cannot initialize encoder: {}", e);
        std::process::exit(1);
    });

    let (planes, strides) = planes_of(&mut buf, pixel_format, width, height);
    let mut picture = Picture {
        format: pixel_format,
        width,
        height,
        planes,
        strides,
    };

    let packet = encoder
        .encode_frame(&mut picture)
        .unwrap_or_else(|e| {
            eprintln!("encode failed: {}", e);
            std::process::exit(1);
        });

    log::info!("writing {} byte packet to {:?}", packet.len(), output_path);
    let mut output_file = File::create(output_path)?;
    output_file.write_all(&encoder.extradata())?;
    output_file.write_all(&packet)?;

    println!(
        "Encoded {}x{} {:?} -> {} bytes (+ 16 bytes extradata)",
        width,
        height,
        pixel_format,
        packet.len()
    );
    Ok(())
}
