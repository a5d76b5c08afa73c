pub fn get_clap_command() -> clap::Command {
    clap::Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            clap::Arg::new("LOADING")
                .long("loading")
                .value_name("SRC")
                .help("Placeholder shown while an image is pending"),
        )
        .arg(
            clap::Arg::new("ERROR")
                .long("error")
                .value_name("SRC")
                .help("Placeholder shown when an image fails to load"),
        )
        .arg(
            clap::Arg::new("ORIGIN")
                .long("origin")
                .value_name("URL")
                .help("Origin relative sources are resolved against"),
        )
        .arg(
            clap::Arg::new("VIEWPORT_HEIGHT")
                .long("viewport-height")
                .value_name("PX")
                .value_parser(clap::value_parser!(u32))
                .default_value("720")
                .help("Height of the simulated viewport"),
        )
        .arg(
            clap::Arg::new("ITEM_HEIGHT")
                .long("item-height")
                .value_name("PX")
                .value_parser(clap::value_parser!(u32).range(1..))
                .default_value("240")
                .help("Height of each image on the page"),
        )
        .arg(
            clap::Arg::new("STEP")
                .long("step")
                .value_name("PX")
                .value_parser(clap::value_parser!(u32).range(1..))
                .default_value("360")
                .help("How far the viewport scrolls per step"),
        )
        .arg(
            clap::Arg::new("SAVE_CONFIG")
                .long("save-config")
                .help("Persist the placeholder and origin options")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("CHECK")
                .long("check")
                .value_name("SRC")
                .conflicts_with("DIR")
                .help("Load a single resource and report the outcome"),
        )
        .arg(
            clap::Arg::new("DIR")
                .help("Directory of images to lay out as a page")
                .index(1)
                .required_unless_present("CHECK"),
        )
}
