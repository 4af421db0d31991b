// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppNumerologie (etat.rs) pour natif + wasm
// - Clavier : Enter calcule (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Outils exacts repliables : rationnel, e^x, Bernoulli
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppNumerologie, SortieRationnel, BERNOULLI_MAX, DIGITS_MAX};
use crate::noyau::{self, NumerologyReport, PiSource, Precision, Rational};

impl AppNumerologie {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Numérologie π · e");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_outils(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Nombre (1 à 999) :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 42")
                .id_source("entree_nombre")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.calculer_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            for source in [PiSource::FirstDigits, PiSource::FixedLastDigits] {
                ui.radio_value(&mut self.source, source, source.label());
            }
        });

        ui.add_space(6.0);

        // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Efface résultat + erreur", Action::ClearResultats);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.add_space(10.0);

            let ok = ui.add_sized([96.0, 30.0], egui::Button::new("Calculer"));
            if ok.clicked() {
                self.calculer_via_noyau();
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(3)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in [['7', '8', '9'], ['4', '5', '6'], ['1', '2', '3']] {
                    for c in ligne {
                        self.bouton_chiffre(ui, c);
                    }
                    ui.end_row();
                }

                self.bouton_chiffre(ui, '0');
                self.bouton_action(ui, "DEL", "Efface le dernier chiffre", Action::Backspace);
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        let texte = self
            .rapport
            .as_ref()
            .map(|r| r.result.to_string())
            .unwrap_or_default();
        Self::champ_monospace(ui, "resultat_out", &texte, 1);

        if let Some(rapport) = &self.rapport {
            egui::CollapsingHeader::new("Démarche")
                .default_open(false)
                .show(ui, |ui| Self::ui_demarche(ui, rapport));
        }
    }

    fn ui_demarche(ui: &mut egui::Ui, r: &NumerologyReport) {
        let liste = |v: &[u32]| {
            v.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self::champ_demarche(ui, "Décimales de π", "demarche_pi", &r.pi_digits);
        Self::champ_demarche(ui, "Décimales de e", "demarche_e", &r.e_digits);
        Self::champ_demarche(ui, "K = π + e", "demarche_k", &r.k.to_string());
        Self::champ_demarche(
            ui,
            &format!("Premiers à 2 chiffres ({})", r.two_digit_primes.len()),
            "demarche_p2",
            &liste(&r.two_digit_primes),
        );
        Self::champ_demarche(
            ui,
            &format!("Premiers à 3 chiffres ({})", r.three_digit_primes.len()),
            "demarche_p3",
            &liste(&r.three_digit_primes),
        );
        Self::champ_demarche(ui, "Produit", "demarche_produit", &r.product.to_string());
    }

    /* ------------------------ Outils exacts ------------------------ */

    fn ui_outils(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Outils exacts")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Précision :");
                    let mut d = self.digits;
                    let resp = ui.add(
                        egui::DragValue::new(&mut d)
                            .speed(1)
                            .range(1..=DIGITS_MAX)
                            .suffix(" chiffres"),
                    );
                    if resp.changed() {
                        self.set_digits(d);
                    }
                });

                ui.add_space(6.0);
                self.ui_outil_rationnel(ui);
                ui.add_space(6.0);
                self.ui_outil_exp(ui);
                ui.add_space(6.0);
                self.ui_outil_bernoulli(ui);

                if !self.erreur_outils.is_empty() {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().error_fg_color, &self.erreur_outils);
                }
            });
    }

    fn ui_outil_rationnel(&mut self, ui: &mut egui::Ui) {
        ui.label("Rationnel (ex: 6/8, 0.1(6), 1.5e-3) :");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.rationnel_entree)
                    .desired_width(200.0)
                    .id_source("entree_rationnel")
                    .code_editor(),
            );
            if ui.button("Analyser").clicked() {
                self.rationnel_via_noyau();
            }
        });

        if let Some(s) = &self.rationnel_sortie {
            egui::Grid::new("sortie_rationnel")
                .num_columns(2)
                .show(ui, |ui| {
                    for (titre, valeur) in [
                        ("Brut", &s.brut),
                        ("Réduit", &s.reduit),
                        ("Mixte", &s.mixte),
                        ("Décimal", &s.decimal),
                    ] {
                        ui.label(titre);
                        ui.monospace(valeur);
                        ui.end_row();
                    }
                });
        }
    }

    fn ui_outil_exp(&mut self, ui: &mut egui::Ui) {
        ui.label("e^x (x rationnel) :");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.exp_entree)
                    .desired_width(200.0)
                    .id_source("entree_exp")
                    .code_editor(),
            );
            if ui.button("e^x").clicked() {
                self.exp_via_noyau();
            }
        });
        if !self.exp_sortie.is_empty() {
            Self::champ_monospace(ui, "exp_out", &self.exp_sortie, 2);
        }
    }

    fn ui_outil_bernoulli(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Bernoulli B(n), n =");
            let mut n = self.bernoulli_n;
            let resp = ui.add(egui::DragValue::new(&mut n).speed(1).range(0..=BERNOULLI_MAX));
            if resp.changed() {
                self.set_bernoulli_n(n);
            }
            if ui.button("B(n)").clicked() {
                self.bernoulli_via_noyau();
            }
        });
        if !self.bernoulli_sortie.is_empty() {
            Self::champ_monospace(ui, "bernoulli_out", &self.bernoulli_sortie, 2);
        }
    }

    /* ------------------------ Widgets ------------------------ */

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // lecture seule, sans TextEdit interactif
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_chiffre(&mut self, ui: &mut egui::Ui, c: char) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(c.to_string()));
        if resp.clicked() {
            self.push_chiffre(c);
        }
    }

    /* ------------------------ Appels au noyau ------------------------ */

    /// Calcule la numérologie via le noyau, puis dépose le rapport dans l’état UI.
    fn calculer_via_noyau(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        let nombre = match s.parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                self.set_erreur(format!("nombre invalide: {s}"));
                return;
            }
        };

        match noyau::find(nombre, self.source) {
            Ok(rapport) => self.set_rapport(rapport),
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    fn precision(&self) -> noyau::Resultat<Precision> {
        Precision::new(self.digits)
    }

    fn rationnel_via_noyau(&mut self) {
        let calcul = || -> noyau::Resultat<SortieRationnel> {
            let r = Rational::parse(&self.rationnel_entree)?;
            let reduit = r.reduce();
            Ok(SortieRationnel {
                brut: r.to_rational_string(),
                reduit: reduit.to_rational_string(),
                mixte: reduit.to_mixed_string(),
                decimal: r.to_decimal(self.precision()?).to_string(),
            })
        };

        match calcul() {
            Ok(sortie) => {
                self.rationnel_sortie = Some(sortie);
                self.erreur_outils.clear();
            }
            Err(e) => {
                self.rationnel_sortie = None;
                self.set_erreur_outils(e.to_string());
            }
        }
    }

    fn exp_via_noyau(&mut self) {
        let calcul = || -> noyau::Resultat<String> {
            let precision = self.precision()?;
            let x = Rational::parse(&self.exp_entree)?;
            Ok(noyau::exp_rational(&x, precision)?.to_string())
        };

        match calcul() {
            Ok(v) => {
                self.exp_sortie = v;
                self.erreur_outils.clear();
            }
            Err(e) => {
                self.exp_sortie.clear();
                self.set_erreur_outils(e.to_string());
            }
        }
    }

    fn bernoulli_via_noyau(&mut self) {
        match noyau::bernoulli(i64::from(self.bernoulli_n)) {
            Ok(b) => {
                self.bernoulli_sortie = b.to_rational_string();
                self.erreur_outils.clear();
            }
            Err(e) => {
                self.bernoulli_sortie.clear();
                self.set_erreur_outils(e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}
