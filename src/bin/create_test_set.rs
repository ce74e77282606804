use failure::Fallible;
use glob::glob;
use itertools::Itertools;
use log::{info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

/// Assembles a test set with matching annotations and images: every
/// annotation in `<src>/Annotations` whose image exists in
/// `<src>/JPEGImages` is copied into a fresh `<dst>/VOC2012_test` tree, and
/// the copied identifiers are written to `ImageSets/Main/test.txt` there.
/// Annotations without an image are skipped with a warning.
#[derive(Debug, StructOpt)]
#[structopt(name = "create_test_set")]
struct Opt {
    /// Source VOC tree with Annotations/ and JPEGImages/
    #[structopt(long, parse(from_os_str))]
    src_path: PathBuf,
    /// Folder that receives the VOC2012_test tree
    #[structopt(long, parse(from_os_str))]
    dst_path: PathBuf,
}

fn main() -> Fallible<()> {
    pretty_env_logger::init();
    let opt = Opt::from_args();
    let copied = assemble_test_set(&opt.src_path, &opt.dst_path)?;
    info!("copied {} samples", copied.len());
    Ok(())
}

fn create_folder(path: &Path) -> Fallible<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)?;
        info!("created folder at `{}`", path.display());
    }
    Ok(())
}

fn assemble_test_set(src_path: &Path, dst_path: &Path) -> Fallible<Vec<String>> {
    let annotations_folder = src_path.join("Annotations");
    let images_folder = src_path.join("JPEGImages");

    let mut stems = vec![];
    for entry in glob(&format!("{}/*.xml", annotations_folder.display()))? {
        let path = entry?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_owned());
        }
    }

    let parent_folder = dst_path.join("VOC2012_test");
    let out_annotations = parent_folder.join("Annotations");
    let out_images = parent_folder.join("JPEGImages");
    let out_sets_main = parent_folder.join("ImageSets").join("Main");
    for folder in &[&parent_folder, &out_annotations, &out_images, &out_sets_main] {
        create_folder(folder)?;
    }

    let copied: Vec<String> = stems
        .par_iter()
        .filter_map(|stem| {
            let src_xml = annotations_folder.join(format!("{}.xml", stem));
            let src_img = images_folder.join(format!("{}.jpg", stem));
            if !src_img.is_file() {
                warn!("no image for xml annotation: {}", stem);
                return None;
            }
            let copy = fs::copy(&src_xml, out_annotations.join(format!("{}.xml", stem)))
                .and_then(|_| fs::copy(&src_img, out_images.join(format!("{}.jpg", stem))));
            match copy {
                Ok(_) => {
                    info!("copied sample: {}", stem);
                    Some(stem.clone())
                }
                Err(err) => {
                    warn!("could not copy sample {}: {}", stem, err);
                    None
                }
            }
        })
        .collect();

    let samples_file = out_sets_main.join("test.txt");
    fs::write(&samples_file, copied.iter().join("\n"))?;
    info!("written to text file: `{}`", samples_file.display());
    Ok(copied)
}
