//! Parameter files. Every subcommand reads its parameters from a json file;
//! without a file an example json is printed instead.

use{
    std::{fs::File, io::{BufReader, Write}},
    serde::{Serialize, de::DeserializeOwned},
    serde_json::Value,
    tracing::info,
    crate::error::CliError,
};

/// `Ok(None)` if no file was given. In that case the default parameters are
/// printed to `out` so they can be used as a template.
pub fn parse<T, W>(file: Option<&String>, out: W) -> Result<Option<(T, Value)>, CliError>
where T: Default + Serialize + DeserializeOwned,
    W: Write
{
    match file
    {
        None => {
            print_example::<T, W>(out)?;
            Ok(None)
        },
        Some(filename) => {
            let f = File::open(filename)
                .map_err(|source| CliError::ConfigRead{path: filename.clone(), source})?;
            let json: Value = serde_json::from_reader(BufReader::new(f))
                .map_err(|source| CliError::ConfigParse{path: filename.clone(), source})?;
            info!(path = %filename, "read parameters");
            parse_value(json).map(Some)
        }
    }
}

pub fn parse_value<T>(json: Value) -> Result<(T, Value), CliError>
where T: DeserializeOwned
{
    let param: T = serde_json::from_value(json.clone())
        .map_err(|source| CliError::ConfigParse{path: "<json>".to_owned(), source})?;
    Ok((param, json))
}

pub fn print_example<T, W>(mut out: W) -> Result<(), CliError>
where T: Default + Serialize,
    W: Write
{
    let example = T::default();
    writeln!(out, "No json file given, here is an example:")?;
    serde_json::to_writer_pretty(&mut out, &example)
        .map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}
