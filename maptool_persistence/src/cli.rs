use std::{path::PathBuf, str::FromStr};

use clap::{ArgAction, Args, Parser, Subcommand};
use maptool_core::api_models::PersistedFileKind;

#[derive(Parser)]
#[command(
    name = "maptool_persistence",
    author,
    about = "Inspects and upgrades extracted MapTool campaign and token files.",
    version
)]
pub struct CliArgs {
    #[arg(
        long = "configuration-file",
        short = 'c',
        global = true,
        help = "Path to the configuration file to use. If unspecified, \"./data/configuration.toml\" is used."
    )]
    pub configuration_file_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}



#[derive(Subcommand)]
pub enum CliCommand {
    #[command(
        name = "upgrade",
        about = "Upgrades an extracted campaign or token file to the current model version."
    )]
    Upgrade(UpgradeCommandArguments),

    #[command(
        name = "check",
        about = "Reports whether an extracted campaign or token file needs to be upgraded."
    )]
    Check(CheckCommandArguments),

    #[command(
        name = "transform",
        about = "Runs the transformations of a version manager over a single file (or standard input) \
                and prints the result."
    )]
    Transform(TransformCommandArguments),

    #[command(
        name = "locate-asset",
        about = "Prints where the image data of an asset is stored inside an extracted campaign."
    )]
    LocateAsset(LocateAssetCommandArguments),
}



#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FileKindArgument(pub PersistedFileKind);

impl FromStr for FileKindArgument {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "campaign" => Ok(Self(PersistedFileKind::Campaign)),
            "token" => Ok(Self(PersistedFileKind::Token)),
            _ => Err("expected either \"campaign\" or \"token\""),
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ManagerArgument {
    Campaign,
    Token,
    AssetName,
}

impl FromStr for ManagerArgument {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "campaign" => Ok(Self::Campaign),
            "token" => Ok(Self::Token),
            "asset-name" => Ok(Self::AssetName),
            _ => Err("expected one of \"campaign\", \"token\" or \"asset-name\""),
        }
    }
}



#[derive(Args)]
pub struct UpgradeCommandArguments {
    #[arg(help = "Directory containing the extracted file (content.xml, properties.xml, assets).")]
    pub directory_path: PathBuf,

    #[arg(
        long = "kind",
        short = 'k',
        default_value = "campaign",
        help = "Kind of the extracted file: \"campaign\" or \"token\"."
    )]
    pub kind: FileKindArgument,

    #[arg(
        long = "output-directory",
        short = 'o',
        help = "If set, the upgraded file is written into this new directory and the original is left \
                untouched. Otherwise the file is upgraded in place."
    )]
    pub output_directory: Option<PathBuf>,

    #[arg(
        long = "assume-yes",
        short = 'y',
        action = ArgAction::SetTrue,
        help = "Don't ask for confirmation when the file was written by a newer program version."
    )]
    pub assume_yes: bool,

    #[arg(
        long = "json",
        action = ArgAction::SetTrue,
        help = "Print the upgrade report as JSON instead of a human-readable summary."
    )]
    pub json: bool,
}



#[derive(Args)]
pub struct CheckCommandArguments {
    #[arg(help = "Directory containing the extracted file (content.xml, properties.xml, assets).")]
    pub directory_path: PathBuf,

    #[arg(
        long = "kind",
        short = 'k',
        default_value = "campaign",
        help = "Kind of the extracted file: \"campaign\" or \"token\"."
    )]
    pub kind: FileKindArgument,
}



#[derive(Args)]
pub struct TransformCommandArguments {
    #[arg(
        long = "manager",
        short = 'm',
        help = "Which set of transformations to run: \"campaign\", \"token\" or \"asset-name\"."
    )]
    pub manager: ManagerArgument,

    #[arg(
        long = "file-version",
        short = 'v',
        help = "Model version the input was written with. Every transformation registered \
                for a later version is applied."
    )]
    pub file_version: String,

    #[arg(help = "File to transform. If unspecified, standard input is read.")]
    pub input_file_path: Option<PathBuf>,
}



#[derive(Args)]
pub struct LocateAssetCommandArguments {
    #[arg(help = "Directory containing the extracted campaign.")]
    pub directory_path: PathBuf,

    #[arg(long = "asset-id", short = 'a', help = "Identifier (MD5 key) of the asset.")]
    pub asset_id: String,

    #[arg(
        long = "extension",
        short = 'e',
        help = "Image file extension of the asset, if known (e.g. \"png\")."
    )]
    pub extension: Option<String>,
}



#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_upgrade_command() {
        let arguments = CliArgs::try_parse_from([
            "maptool_persistence",
            "upgrade",
            "./campaign",
            "--kind",
            "token",
            "--output-directory",
            "./upgraded",
            "-y",
        ])
        .unwrap();

        let CliCommand::Upgrade(upgrade_arguments) = arguments.command else {
            panic!("expected the upgrade subcommand");
        };

        assert_eq!(upgrade_arguments.directory_path, PathBuf::from("./campaign"));
        assert_eq!(upgrade_arguments.kind, FileKindArgument(PersistedFileKind::Token));
        assert_eq!(
            upgrade_arguments.output_directory,
            Some(PathBuf::from("./upgraded"))
        );
        assert!(upgrade_arguments.assume_yes);
        assert!(!upgrade_arguments.json);
    }

    #[test]
    fn configuration_file_is_a_global_argument() {
        let arguments = CliArgs::try_parse_from([
            "maptool_persistence",
            "check",
            "./campaign",
            "--configuration-file",
            "./custom.toml",
        ])
        .unwrap();

        assert_eq!(
            arguments.configuration_file_path,
            Some(PathBuf::from("./custom.toml"))
        );
    }

    #[test]
    fn rejects_unknown_manager() {
        assert!(CliArgs::try_parse_from([
            "maptool_persistence",
            "transform",
            "--manager",
            "map",
            "--file-version",
            "1.3.50",
        ])
        .is_err());

        assert_eq!(
            "asset-name".parse::<ManagerArgument>(),
            Ok(ManagerArgument::AssetName)
        );
    }
}
