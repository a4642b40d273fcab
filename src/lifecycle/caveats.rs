use crate::config::Config;
use crate::host::Host;
use crate::login_item::Mechanism;

pub(super) fn render(config: &Config, host: &Host) -> String {
    let name = &config.package.name;
    let id = &config.login_item.id;
    let bundle = host.applications.join(&config.package.app);
    let release = host.macos.codename().map_or_else(|| host.macos.to_string(), title_case);

    let manage = match Mechanism::for_version(host.macos) {
        Mechanism::Modern => format!(
            "  - System Settings → General → Login Items ({name} visible)\n\
             \x20 - Manual removal: loginitemutil remove {id}\n"
        ),
        Mechanism::Legacy => {
            let plist = host.launch_agents_dir().join(format!("{id}.plist"));
            format!(
                "  - System Settings → Users & Groups → Login Items ({name} visible)\n\
                 \x20 - Manual removal: launchctl unload {p} && rm -f {p}\n",
                p = plist.display()
            )
        }
    };

    format!(
        "{name} {version} installed (macOS {release}).\n\
         \n\
         Launch application:\n\
         \x20 open {bundle}\n\
         \n\
         Manage login items:\n\
         {manage}\
         \n\
         Update application:\n\
         \x20 maxlaunchpad install\n",
        version = config.package.version,
        bundle = bundle.display(),
    )
}

fn title_case(s: &str) -> String {
    s.split('_')
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |c| c.to_uppercase().chain(chars).collect())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
