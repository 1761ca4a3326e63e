//! Host operating system detection and the ASCII logos shown in the
//! static system panel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distro {
    Kali,
    Arch,
    Ubuntu,
    Debian,
    Fedora,
    Manjaro,
    Mint,
    Pop,
    RedHat,
    Suse,
    MacOs,
    Windows,
    #[default]
    Linux,
}

impl Distro {
    /// Detect the running OS. Linux falls back to the generic entry when
    /// `/etc/os-release` is missing or unrecognized.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => Distro::MacOs,
            "windows" => Distro::Windows,
            _ => std::fs::read_to_string("/etc/os-release")
                .map(|content| parse_os_release(&content))
                .unwrap_or(Distro::Linux),
        }
    }

    pub fn logo(&self) -> &'static [&'static str] {
        match self {
            Distro::Windows => &[
                "################  ################",
                "################  ################",
                "################  ################",
                "                                  ",
                "################  ################",
                "################  ################",
                "################  ################",
            ],
            Distro::MacOs => &[
                "                 .:'            ",
                "             __ :'__            ",
                "          .'`  `-'  ``.         ",
                "         :          .-'         ",
                "        :          :            ",
                "         :         `-;          ",
                "          `.__.-.__.'           ",
            ],
            Distro::Arch | Distro::Manjaro => &[
                "       /\\          ",
                "      /  \\         ",
                "     /    \\        ",
                "    /      \\       ",
                "   /   ,,   \\      ",
                "  /   |  |   \\     ",
                " /_-''    ''-_\\    ",
            ],
            Distro::Debian => &[
                "       _,met$$$$$gg.       ",
                "    ,g$$$$$$$$$$$$$$$P.    ",
                "  ,g$$P\"\"       \"\"\"Y$$.\". ",
                " ,$$P'              `$$$. ",
                "',$$P       ,ggs.     `$$b:",
                "`d$$'     ,$P\"'   .    $$$",
                " $$P      d$'     ,    $$$P",
            ],
            Distro::Kali => &[
                "      ..         ",
                "    .WWWW.       ",
                "   .WW  WW.      ",
                "  .WW    WW.     ",
                "  WW  ..  WW     ",
                "  WW WWWW WW     ",
                "   KALI LINUX    ",
            ],
            Distro::Fedora => &[
                "        ,'''''.          ",
                "       |   ,.  |         ",
                "       |  |  '_'         ",
                "  ,....|  |..            ",
                ".'  ,_____   ``'.        ",
                "|  'fffff' `'  |         ",
                "|   f   f     ;          ",
            ],
            Distro::Ubuntu | Distro::Mint | Distro::Pop => &[
                "         _            ",
                "     ---(_)           ",
                " _/  ---  \\           ",
                "(_) |   |             ",
                "  \\  --- _/           ",
                "     ---(_)           ",
                "                      ",
            ],
            Distro::RedHat | Distro::Suse | Distro::Linux => &[
                "        .--.        ",
                "       |o_o |       ",
                "       |:_/ |       ",
                "      //   \\ \\      ",
                "     (|     | )     ",
                "    /'\\_   _/`\\     ",
                "    \\___)=(___/     ",
            ],
        }
    }

    /// RGB accent used when printing the logo.
    pub fn logo_color(&self) -> (u8, u8, u8) {
        match self {
            Distro::Windows | Distro::Arch | Distro::Pop => (0, 215, 255),
            Distro::MacOs => (230, 230, 230),
            Distro::Ubuntu => (233, 84, 32),
            Distro::Debian | Distro::RedHat => (230, 40, 60),
            Distro::Fedora | Distro::Kali => (80, 130, 255),
            Distro::Manjaro | Distro::Mint | Distro::Suse => (80, 220, 100),
            Distro::Linux => (250, 220, 60),
        }
    }
}

fn from_id(id: &str) -> Option<Distro> {
    let distro = match id {
        "kali" => Distro::Kali,
        "arch" | "archarm" | "endeavouros" => Distro::Arch,
        "ubuntu" => Distro::Ubuntu,
        "debian" => Distro::Debian,
        "fedora" => Distro::Fedora,
        "manjaro" => Distro::Manjaro,
        "linuxmint" | "mint" => Distro::Mint,
        "pop" => Distro::Pop,
        "rhel" | "centos" | "rocky" | "almalinux" => Distro::RedHat,
        id if id.starts_with("opensuse") || id == "suse" || id == "sles" => Distro::Suse,
        _ => return None,
    };
    Some(distro)
}

/// Map an `/etc/os-release` body to a distribution, trying `ID` before
/// the space-separated `ID_LIKE` list.
pub fn parse_os_release(content: &str) -> Distro {
    let field = |key: &str| {
        content.lines().find_map(|line| {
            line.strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|v| v.trim().trim_matches('"').to_lowercase())
        })
    };

    if let Some(distro) = field("ID").as_deref().and_then(from_id) {
        return distro;
    }

    field("ID_LIKE")
        .and_then(|like| like.split_whitespace().find_map(from_id))
        .unwrap_or(Distro::Linux)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_wins_over_id_like() {
        let content = "NAME=\"Manjaro Linux\"\nID=manjaro\nID_LIKE=arch\n";
        assert_eq!(parse_os_release(content), Distro::Manjaro);
    }

    #[test]
    fn test_falls_back_to_id_like() {
        let content = "NAME=Zorin\nID=zorin\nID_LIKE=\"ubuntu debian\"\n";
        assert_eq!(parse_os_release(content), Distro::Ubuntu);
    }

    #[test]
    fn test_unknown_is_generic_linux() {
        assert_eq!(parse_os_release("ID=nixos\n"), Distro::Linux);
        assert_eq!(parse_os_release(""), Distro::Linux);
    }

    #[test]
    fn test_logos_have_equal_height() {
        for distro in [Distro::Kali, Distro::MacOs, Distro::Windows, Distro::Linux] {
            assert_eq!(distro.logo().len(), 7);
        }
    }
}
