//! Command parsing and execution.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ds3_client::{Client, Request};
use ds3_model::{BulkObjectList, BulkResponse};
use tracing::info;

/// Command-line client for DS3 object storage.
///
/// Connection settings come from the `DS3_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "ds3", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A parsed command line.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the buckets owned by the caller
    Service,

    /// List the objects in a bucket
    Bucket {
        /// Bucket name
        name: String,
    },

    /// Download an object into a local file
    Get {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
        /// Destination file
        file: PathBuf,
    },

    /// Upload a local file as an object
    Put {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
        /// Source file
        file: PathBuf,
    },

    /// Delete an object, or the bucket itself when no key is given
    Delete {
        /// Bucket name
        bucket: String,
        /// Object key
        key: Option<String>,
    },

    /// Create a bucket
    #[command(name = "mkbucket")]
    MakeBucket {
        /// Bucket name
        name: String,
    },

    /// Start a bulk put job and upload each scheduled file
    BulkPut {
        /// Bucket name
        bucket: String,
        /// Local files, uploaded under their given paths as keys
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Start a bulk get job and download each scheduled object
    BulkGet {
        /// Bucket name
        bucket: String,
        /// Object keys
        #[arg(required = true, value_name = "KEY")]
        keys: Vec<String>,
    },
}

impl Command {
    /// Run the command, writing human-readable results to `out`.
    pub fn run(&self, client: &Client, out: &mut dyn Write) -> Result<()> {
        match self {
            Self::Service => {
                let output = client.get_service(&Request::get_service())?;
                if let Some(owner) = &output.owner {
                    writeln!(
                        out,
                        "Owner: {} ({})",
                        owner.display_name.as_deref().unwrap_or("-"),
                        owner.id.as_deref().unwrap_or("-")
                    )?;
                }
                for bucket in &output.buckets {
                    writeln!(
                        out,
                        "{}\t{}",
                        bucket.name.as_deref().unwrap_or_default(),
                        bucket.creation_date.as_deref().unwrap_or("-")
                    )?;
                }
            }
            Self::Bucket { name } => {
                let output = client.get_bucket(&Request::get_bucket(name))?;
                for object in &output.objects {
                    writeln!(
                        out,
                        "{}\t{}\t{}",
                        object.key.as_deref().unwrap_or_default(),
                        object.size.unwrap_or_default(),
                        object.last_modified.as_deref().unwrap_or("-")
                    )?;
                }
                if output.is_truncated {
                    writeln!(
                        out,
                        "(truncated, next marker: {})",
                        output.next_marker.as_deref().unwrap_or("-")
                    )?;
                }
            }
            Self::Get { bucket, key, file } => {
                download(client, bucket, key, file)?;
                writeln!(out, "Downloaded {bucket}/{key} to {}", file.display())?;
            }
            Self::Put { bucket, key, file } => {
                let length = upload(client, bucket, key, file)?;
                writeln!(out, "Uploaded {} ({length} bytes) to {bucket}/{key}", file.display())?;
            }
            Self::Delete {
                bucket,
                key: Some(key),
            } => {
                client.delete_object(&Request::delete_object(bucket, key))?;
                writeln!(out, "Deleted {bucket}/{key}")?;
            }
            Self::Delete { bucket, key: None } => {
                client.delete_bucket(&Request::delete_bucket(bucket))?;
                writeln!(out, "Deleted bucket {bucket}")?;
            }
            Self::MakeBucket { name } => {
                client.put_bucket(&Request::put_bucket(name))?;
                writeln!(out, "Created bucket {name}")?;
            }
            Self::BulkPut { bucket, files } => {
                let objects = BulkObjectList::from_files(files);
                let job = client.bulk(&Request::put_bulk(bucket, objects))?;
                print_job(out, &job)?;
                for chunk in &job.chunks {
                    for object in chunk {
                        upload(client, bucket, &object.name, Path::new(&object.name))?;
                        writeln!(out, "Uploaded {}", object.name)?;
                    }
                }
            }
            Self::BulkGet { bucket, keys } => {
                let objects = BulkObjectList::from_entries(keys.iter().map(|k| (k.as_str(), 0)));
                let job = client.bulk(&Request::get_bulk(bucket, objects))?;
                print_job(out, &job)?;
                for chunk in &job.chunks {
                    for object in chunk {
                        let file = local_name(&object.name);
                        download(client, bucket, &object.name, &file)?;
                        writeln!(out, "Downloaded {} to {}", object.name, file.display())?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn print_job(out: &mut dyn Write, job: &BulkResponse) -> Result<()> {
    writeln!(
        out,
        "Job {}: {} chunks, {} objects",
        job.job_id,
        job.chunks.len(),
        job.object_count()
    )?;
    for chunk in &job.chunks {
        writeln!(
            out,
            "  chunk {} on {}: {} objects, {} bytes",
            chunk.chunk_number.map_or_else(|| "-".to_owned(), |n| n.to_string()),
            chunk.server_id.as_deref().unwrap_or("-"),
            chunk.len(),
            chunk.total_size()
        )?;
    }
    Ok(())
}

fn download(client: &Client, bucket: &str, key: &str, file: &Path) -> Result<()> {
    let handle =
        File::create(file).with_context(|| format!("cannot create {}", file.display()))?;
    let mut sink = BufWriter::new(handle);
    client.get_object(&Request::get_object(bucket, key), &mut sink)?;
    sink.flush()
        .with_context(|| format!("cannot write {}", file.display()))?;
    info!(bucket, key, file = %file.display(), "downloaded object");
    Ok(())
}

fn upload(client: &Client, bucket: &str, key: &str, file: &Path) -> Result<u64> {
    let handle = File::open(file).with_context(|| format!("cannot open {}", file.display()))?;
    let length = handle
        .metadata()
        .with_context(|| format!("cannot stat {}", file.display()))?
        .len();
    client.put_object(&Request::put_object(bucket, key, length), Box::new(handle))?;
    info!(bucket, key, length, "uploaded object");
    Ok(length)
}

/// Local file name for a downloaded key: its last path segment.
fn local_name(key: &str) -> PathBuf {
    Path::new(key)
        .file_name()
        .map_or_else(|| PathBuf::from(key), PathBuf::from)
}
