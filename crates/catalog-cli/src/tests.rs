use std::path::PathBuf;

use catalog_core::{Attribute, AttributeCatalog, FormField, FormValue};

use super::*;
use crate::api::format_catalog;
use crate::variants::{build_form, format_field};

fn write_catalog(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "catalog-cli-{}-{tag}.yaml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        concat!(
            "attributes:\n",
            "  - name: Color\n    values: [Red, Blue, Green]\n",
            "  - name: Size\n    values: [S, M, L]\n",
        ),
    )
    .expect("write temp catalog");
    path
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["catalog-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_attributes_command() {
    let cli = Cli::try_parse_from(["catalog-cli", "attributes"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Attributes)));
}

#[test]
fn parses_product_command_with_id() {
    let cli = Cli::try_parse_from(["catalog-cli", "product", "42"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Product { id: 42 })));
}

#[test]
fn parses_repeated_options() {
    let cli = Cli::try_parse_from([
        "catalog-cli",
        "variants",
        "--catalog",
        "attrs.yaml",
        "--option",
        "Color=Red,Blue",
        "--option",
        "Size=S",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Variants { catalog, options }) => {
            assert_eq!(catalog, PathBuf::from("attrs.yaml"));
            assert_eq!(options.len(), 2);
            assert_eq!(options[0].attribute, "Color");
            assert_eq!(options[0].values, vec!["Red", "Blue"]);
            assert_eq!(options[1].values, vec!["S"]);
        }
        other => panic!("expected variants command, got {other:?}"),
    }
}

#[test]
fn parses_payload_update_flag() {
    let cli = Cli::try_parse_from([
        "catalog-cli",
        "payload",
        "--catalog",
        "attrs.yaml",
        "--name",
        "Tee",
        "--update",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Payload { update: true, ref name, .. }) if name == "Tee"
    ));
}

#[test]
fn malformed_option_is_rejected() {
    let result = Cli::try_parse_from(["catalog-cli", "variants", "--option", "Color"]);
    assert!(result.is_err());
}

#[test]
fn option_arg_trims_and_drops_blank_values() {
    let arg: OptionArg = " Size = S, ,M ,".parse().unwrap();
    assert_eq!(arg.attribute, "Size");
    assert_eq!(arg.values, vec!["S", "M"]);
}

#[test]
fn option_arg_requires_a_name() {
    assert!("=Red".parse::<OptionArg>().is_err());
}

#[test]
fn option_arg_allows_empty_value_list() {
    let arg: OptionArg = "Color=".parse().unwrap();
    assert!(arg.values.is_empty());
}

#[test]
fn build_form_generates_cartesian_variants() {
    let path = write_catalog("build");
    let options = vec![
        "Color=Red,Blue".parse::<OptionArg>().unwrap(),
        "Size=S,M".parse::<OptionArg>().unwrap(),
    ];
    let form = build_form(&path, &options, "Tee").unwrap();
    std::fs::remove_file(&path).ok();

    let labels: Vec<String> = form
        .variants()
        .iter()
        .map(|v| v.attributes.label())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Color: Red, Size: S",
            "Color: Red, Size: M",
            "Color: Blue, Size: S",
            "Color: Blue, Size: M",
        ]
    );
    assert_eq!(form.name, "Tee");
}

#[test]
fn build_form_ignores_unknown_attributes() {
    let path = write_catalog("unknown");
    let options = vec!["Material=Wool".parse::<OptionArg>().unwrap()];
    let form = build_form(&path, &options, "Tee").unwrap();
    std::fs::remove_file(&path).ok();
    assert!(form.variants().is_empty());
}

#[test]
fn build_form_reports_missing_catalog() {
    let result = build_form(&PathBuf::from("/nonexistent/attributes.yaml"), &[], "Tee");
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("failed to load catalog"), "got: {message}");
}

#[test]
fn format_field_marks_uploads() {
    let text = FormField {
        name: "name".to_string(),
        value: FormValue::Text("Tee".to_string()),
    };
    let file = FormField {
        name: "featuredImage".to_string(),
        value: FormValue::File(PathBuf::from("img/tee.jpg")),
    };
    assert_eq!(format_field(&text), "name=Tee");
    assert_eq!(format_field(&file), "featuredImage=@img/tee.jpg");
}

#[test]
fn format_catalog_shows_ids_when_known() {
    let catalog = AttributeCatalog::new(vec![
        Attribute::new("Color", ["Red", "Blue"]).with_id(3),
        Attribute::new("Size", ["S"]),
    ]);
    assert_eq!(
        format_catalog(&catalog),
        vec!["[3] Color: Red, Blue", "[-] Size: S"]
    );
}
